use axum::extract::State;
use axum::Json;
use metrics::gauge;

use crate::db::dashboard_repo::{self, PortfolioOverview};
use crate::errors::AppError;
use crate::AppState;

/// GET /api/dashboard/overview
pub async fn overview(State(state): State<AppState>) -> Result<Json<PortfolioOverview>, AppError> {
    let overview = dashboard_repo::get_overview(&state.db).await?;

    gauge!("open_positions").set(overview.open_positions as f64);

    Ok(Json(overview))
}

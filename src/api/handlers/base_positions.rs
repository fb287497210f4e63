use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use metrics::counter;
use serde_json::{json, Value};

use crate::api::extract::{AppJson, AppPath};
use crate::db::base_position_repo;
use crate::errors::AppError;
use crate::models::requests::{CreateBasePosition, UpdateBasePosition};
use crate::models::{BasePosition, BasePositionDetail, BasePositionSummary};
use crate::AppState;

fn position_not_found() -> AppError {
    AppError::NotFound("Position not found".into())
}

/// GET /api/base-positions — every position with its leg counts
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<BasePositionSummary>>, AppError> {
    let positions = base_position_repo::list_base_positions(&state.db).await?;
    Ok(Json(positions))
}

/// GET /api/base-positions/{id} — position with its option and stock legs
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BasePositionDetail>, AppError> {
    let detail = base_position_repo::get_base_position_detail(&state.db, id)
        .await?
        .ok_or_else(position_not_found)?;

    Ok(Json(detail))
}

/// POST /api/base-positions — open a new position
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut body): AppJson<CreateBasePosition>,
) -> Result<(StatusCode, Json<BasePosition>), AppError> {
    body.validate()?;

    let today = Utc::now().date_naive();
    let position = base_position_repo::create_base_position(&state.db, &body, today).await?;

    counter!("base_positions_created_total").increment(1);
    tracing::info!(
        id = position.id,
        symbol = %position.symbol,
        strategy = %position.strategy_type,
        "Base position created"
    );

    Ok((StatusCode::CREATED, Json(position)))
}

/// PUT /api/base-positions/{id} — full replacement of the editable fields
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(mut body): AppJson<UpdateBasePosition>,
) -> Result<Json<BasePosition>, AppError> {
    body.validate()?;

    let position = base_position_repo::update_base_position(&state.db, id, &body)
        .await?
        .ok_or_else(position_not_found)?;

    tracing::info!(id, status = %position.position_status, "Base position updated");
    Ok(Json(position))
}

/// DELETE /api/base-positions/{id} — removes the position and all its legs
pub async fn remove(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    if !base_position_repo::delete_base_position(&state.db, id).await? {
        return Err(position_not_found());
    }

    counter!("base_positions_deleted_total").increment(1);
    tracing::info!(id, "Base position deleted");

    Ok(Json(json!({ "message": "Position deleted successfully" })))
}

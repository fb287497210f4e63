use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use metrics::counter;
use serde_json::{json, Value};

use crate::api::extract::{AppJson, AppPath, AppQuery, LegFilter};
use crate::db::stock_repo;
use crate::errors::AppError;
use crate::models::requests::{CreateStockLeg, UpdateStockLeg};
use crate::models::StockSharePosition;
use crate::AppState;

fn stock_not_found() -> AppError {
    AppError::NotFound("Stock position not found".into())
}

/// GET /api/stocks?base_position_id= — stock legs, newest first
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<LegFilter>,
) -> Result<Json<Vec<StockSharePosition>>, AppError> {
    let stocks = stock_repo::list_stocks(&state.db, filter.base_position_id).await?;
    Ok(Json(stocks))
}

/// GET /api/stocks/{id}
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<StockSharePosition>, AppError> {
    let stock = stock_repo::get_stock(&state.db, id)
        .await?
        .ok_or_else(stock_not_found)?;

    Ok(Json(stock))
}

/// POST /api/stocks — record a share purchase or sale under a base position
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateStockLeg>,
) -> Result<(StatusCode, Json<StockSharePosition>), AppError> {
    body.validate()?;

    let stock = stock_repo::create_stock(&state.db, &body).await?;

    counter!("stock_legs_written_total").increment(1);
    tracing::info!(
        id = stock.id,
        base_position_id = stock.base_position_id,
        action = %stock.action,
        shares = stock.shares,
        "Stock leg created"
    );

    Ok((StatusCode::CREATED, Json(stock)))
}

/// PUT /api/stocks/{id} — full replacement of the trade terms
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateStockLeg>,
) -> Result<Json<StockSharePosition>, AppError> {
    body.validate()?;

    let stock = stock_repo::update_stock(&state.db, id, &body)
        .await?
        .ok_or_else(stock_not_found)?;

    counter!("stock_legs_written_total").increment(1);
    tracing::info!(id, action = %stock.action, shares = stock.shares, "Stock leg updated");

    Ok(Json(stock))
}

/// DELETE /api/stocks/{id}
pub async fn remove(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    if !stock_repo::delete_stock(&state.db, id).await? {
        return Err(stock_not_found());
    }

    counter!("stock_legs_written_total").increment(1);
    tracing::info!(id, "Stock leg deleted");

    Ok(Json(json!({ "message": "Stock position deleted successfully" })))
}

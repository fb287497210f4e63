use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use metrics::counter;
use serde_json::{json, Value};

use crate::api::extract::{AppJson, AppPath, AppQuery, LegFilter};
use crate::db::option_repo;
use crate::errors::AppError;
use crate::models::requests::{CreateOptionLeg, UpdateOptionLeg};
use crate::models::OptionPosition;
use crate::AppState;

fn option_not_found() -> AppError {
    AppError::NotFound("Option not found".into())
}

/// GET /api/options?base_position_id= — option legs, newest first
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<LegFilter>,
) -> Result<Json<Vec<OptionPosition>>, AppError> {
    let options = option_repo::list_options(&state.db, filter.base_position_id).await?;
    Ok(Json(options))
}

/// GET /api/options/{id}
pub async fn detail(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<OptionPosition>, AppError> {
    let option = option_repo::get_option(&state.db, id)
        .await?
        .ok_or_else(option_not_found)?;

    Ok(Json(option))
}

/// POST /api/options — record an option leg under a base position
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateOptionLeg>,
) -> Result<(StatusCode, Json<OptionPosition>), AppError> {
    body.validate()?;

    let option = option_repo::create_option(&state.db, &body).await?;

    counter!("option_legs_written_total").increment(1);
    tracing::info!(
        id = option.id,
        base_position_id = option.base_position_id,
        action = %option.option_action,
        contracts = option.contracts,
        "Option leg created"
    );

    Ok((StatusCode::CREATED, Json(option)))
}

/// PUT /api/options/{id} — full replacement, including the open flag
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateOptionLeg>,
) -> Result<Json<OptionPosition>, AppError> {
    body.validate()?;

    let option = option_repo::update_option(&state.db, id, &body)
        .await?
        .ok_or_else(option_not_found)?;

    counter!("option_legs_written_total").increment(1);
    tracing::info!(id, is_open = option.is_open, "Option leg updated");

    Ok(Json(option))
}

/// DELETE /api/options/{id}
pub async fn remove(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    if !option_repo::delete_option(&state.db, id).await? {
        return Err(option_not_found());
    }

    counter!("option_legs_written_total").increment(1);
    tracing::info!(id, "Option leg deleted");

    Ok(Json(json!({ "message": "Option deleted successfully" })))
}

use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

/// `Json` whose rejection is reported as a 400 `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` whose rejection is reported as a 400 `{"error": ...}` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `Query` whose rejection is reported as a 400 `{"error": ...}` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Optional `base_position_id` filter shared by the leg listings.
#[derive(Debug, Default, Deserialize)]
pub struct LegFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub base_position_id: Option<i64>,
}

/// `?base_position_id=` with no value means "no filter".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

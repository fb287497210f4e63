use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{OptionPosition, PositionStatus, StockSharePosition, StrategyType};

/// Database row for base_position table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BasePosition {
    pub id: i64,
    pub symbol: String,
    pub position_name: String,
    pub strategy_type: StrategyType,
    pub underlying_price: Decimal,
    pub position_status: PositionStatus,
    pub notes: Option<String>,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub net_position_value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List row: a base position plus how many legs hang off it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BasePositionSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub position: BasePosition,
    pub option_count: i64,
    pub stock_count: i64,
}

/// A base position with all of its legs, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasePositionDetail {
    #[serde(flatten)]
    pub position: BasePosition,
    pub options: Vec<OptionPosition>,
    pub stocks: Vec<StockSharePosition>,
}

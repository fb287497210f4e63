use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::TradeAction;

/// Database row for stock_share_position table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockSharePosition {
    pub id: i64,
    pub base_position_id: i64,
    pub action: TradeAction,
    pub shares: i32,
    pub share_price: Decimal,
    pub fees_commissions: Decimal,
    pub trade_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{LegPurpose, OptionType, TradeAction};

/// Database row for option_position table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OptionPosition {
    pub id: i64,
    pub base_position_id: i64,
    pub position_type: LegPurpose,
    pub option_type: OptionType,
    pub option_action: TradeAction,
    pub strike_price: Decimal,
    pub expiration_date: NaiveDate,
    pub contracts: i32,
    pub premium_per_contract: Decimal,
    pub fees_commissions: Decimal,
    pub trade_date: NaiveDate,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

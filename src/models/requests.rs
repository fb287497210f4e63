//! Typed request bodies. Shape is enforced by serde at the extractor;
//! `validate` then checks the values before anything reaches the database.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use super::{LegPurpose, OptionType, PositionStatus, StrategyType, TradeAction};
use crate::errors::AppError;

const MAX_SYMBOL_LEN: usize = 16;

/// Exclusive bound on any stored amount: `NUMERIC(14, 4)` keeps ten integer
/// digits. A single leg's gross plus fees is held to the same bound.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

/// Trimmed, upper-cased ticker or a validation error.
pub fn normalize_symbol(raw: &str) -> Result<String, AppError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(invalid("symbol is required"));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(invalid(format!(
            "symbol must be at most {MAX_SYMBOL_LEN} characters"
        )));
    }
    Ok(symbol)
}

/// Display name assigned at creation: `"{symbol} {strategy_type} {date}"`.
pub fn position_name(symbol: &str, strategy_type: StrategyType, created_on: NaiveDate) -> String {
    format!("{symbol} {strategy_type} {}", created_on.format("%Y-%m-%d"))
}

fn require_in_range(field: &str, value: Decimal) -> Result<(), AppError> {
    // Postgres rounds half away from zero to the column scale before the
    // precision check.
    let stored = value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    if stored >= AMOUNT_LIMIT {
        return Err(invalid(format!("{field} must be less than {AMOUNT_LIMIT}")));
    }
    Ok(())
}

fn require_positive(field: &str, value: Decimal) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(invalid(format!("{field} must be greater than 0")));
    }
    require_in_range(field, value)
}

fn require_non_negative(field: &str, value: Decimal) -> Result<(), AppError> {
    if value < Decimal::ZERO {
        return Err(invalid(format!("{field} must not be negative")));
    }
    require_in_range(field, value)
}

/// Price times quantity plus fees for one leg.
fn require_leg_amount(field: &str, price: Decimal, quantity: i32, fees: Decimal) -> Result<(), AppError> {
    let amount = price
        .checked_mul(Decimal::from(quantity))
        .and_then(|gross| gross.checked_add(fees));
    match amount {
        Some(amount) => require_in_range(field, amount),
        None => Err(invalid(format!("{field} must be less than {AMOUNT_LIMIT}"))),
    }
}

fn require_positive_count(field: &str, value: i32) -> Result<(), AppError> {
    if value <= 0 {
        return Err(invalid(format!("{field} must be greater than 0")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Base position
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBasePosition {
    pub symbol: String,
    pub strategy_type: StrategyType,
    pub underlying_price: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBasePosition {
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.symbol = normalize_symbol(&self.symbol)?;
        require_positive("underlying_price", self.underlying_price)
    }
}

/// Full replacement of a base position's editable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBasePosition {
    pub symbol: String,
    pub position_name: String,
    pub strategy_type: StrategyType,
    pub underlying_price: Decimal,
    pub position_status: PositionStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateBasePosition {
    pub fn validate(&mut self) -> Result<(), AppError> {
        self.symbol = normalize_symbol(&self.symbol)?;
        self.position_name = self.position_name.trim().to_string();
        if self.position_name.is_empty() {
            return Err(invalid("position_name is required"));
        }
        require_positive("underlying_price", self.underlying_price)
    }
}

// ---------------------------------------------------------------------------
// Option legs
// ---------------------------------------------------------------------------

/// Contract terms shared by option create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionTerms {
    pub position_type: LegPurpose,
    pub option_type: OptionType,
    pub option_action: TradeAction,
    pub strike_price: Decimal,
    pub expiration_date: NaiveDate,
    pub contracts: i32,
    pub premium_per_contract: Decimal,
    #[serde(default)]
    pub fees_commissions: Decimal,
    pub trade_date: NaiveDate,
}

impl OptionTerms {
    fn validate(&self) -> Result<(), AppError> {
        require_positive("strike_price", self.strike_price)?;
        require_positive_count("contracts", self.contracts)?;
        require_non_negative("premium_per_contract", self.premium_per_contract)?;
        require_non_negative("fees_commissions", self.fees_commissions)?;
        require_leg_amount(
            "premium_per_contract * contracts + fees_commissions",
            self.premium_per_contract,
            self.contracts,
            self.fees_commissions,
        )?;
        if self.expiration_date < self.trade_date {
            return Err(invalid("expiration_date must not be before trade_date"));
        }
        Ok(())
    }
}

fn default_open() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOptionLeg {
    pub base_position_id: i64,
    #[serde(flatten)]
    pub terms: OptionTerms,
    #[serde(default = "default_open")]
    pub is_open: bool,
}

impl CreateOptionLeg {
    pub fn validate(&self) -> Result<(), AppError> {
        self.terms.validate()
    }
}

/// Full replacement of an option leg. The owning base position is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOptionLeg {
    #[serde(flatten)]
    pub terms: OptionTerms,
    pub is_open: bool,
}

impl UpdateOptionLeg {
    pub fn validate(&self) -> Result<(), AppError> {
        self.terms.validate()
    }
}

// ---------------------------------------------------------------------------
// Stock legs
// ---------------------------------------------------------------------------

/// Trade terms shared by stock create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct StockTerms {
    pub action: TradeAction,
    pub shares: i32,
    pub share_price: Decimal,
    #[serde(default)]
    pub fees_commissions: Decimal,
    pub trade_date: NaiveDate,
}

impl StockTerms {
    fn validate(&self) -> Result<(), AppError> {
        require_positive_count("shares", self.shares)?;
        require_non_negative("share_price", self.share_price)?;
        require_non_negative("fees_commissions", self.fees_commissions)?;
        require_leg_amount(
            "share_price * shares + fees_commissions",
            self.share_price,
            self.shares,
            self.fees_commissions,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStockLeg {
    pub base_position_id: i64,
    #[serde(flatten)]
    pub terms: StockTerms,
}

impl CreateStockLeg {
    pub fn validate(&self) -> Result<(), AppError> {
        self.terms.validate()
    }
}

/// Full replacement of a stock leg. The owning base position is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStockLeg {
    #[serde(flatten)]
    pub terms: StockTerms,
}

impl UpdateStockLeg {
    pub fn validate(&self) -> Result<(), AppError> {
        self.terms.validate()
    }
}

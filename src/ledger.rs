//! Cash-flow rules that derive a base position's stored totals from its legs.
//!
//! Every leg moves cash exactly once: selling brings premium or proceeds in
//! (a credit), buying pays it out (a debit). Fees and commissions are always
//! debits. Closed option legs still count since their premium already
//! changed hands.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{OptionPosition, StockSharePosition, TradeAction};

/// Derived totals written back onto `base_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PositionTotals {
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub net_position_value: Decimal,
}

/// The cash a single leg contributes, split into its credit and debit sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegCashFlow {
    pub credit: Decimal,
    pub debit: Decimal,
}

impl LegCashFlow {
    fn from_trade(action: TradeAction, gross: Decimal, fees: Decimal) -> Self {
        match action {
            TradeAction::Sell => LegCashFlow {
                credit: gross,
                debit: fees,
            },
            TradeAction::Buy => LegCashFlow {
                credit: Decimal::ZERO,
                debit: gross + fees,
            },
        }
    }
}

/// Premium per contract times contract count.
pub fn option_cash_flow(leg: &OptionPosition) -> LegCashFlow {
    let gross = leg.premium_per_contract * Decimal::from(leg.contracts);
    LegCashFlow::from_trade(leg.option_action, gross, leg.fees_commissions)
}

/// Share price times share count.
pub fn stock_cash_flow(leg: &StockSharePosition) -> LegCashFlow {
    let gross = leg.share_price * Decimal::from(leg.shares);
    LegCashFlow::from_trade(leg.action, gross, leg.fees_commissions)
}

/// Fold every leg of one base position into its stored totals.
pub fn compute_totals(options: &[OptionPosition], stocks: &[StockSharePosition]) -> PositionTotals {
    let flows = options
        .iter()
        .map(option_cash_flow)
        .chain(stocks.iter().map(stock_cash_flow));

    let (total_credits, total_debits) = flows.fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(credits, debits), flow| (credits + flow.credit, debits + flow.debit),
    );

    PositionTotals {
        total_credits,
        total_debits,
        net_position_value: total_credits - total_debits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LegPurpose, OptionType};
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn option_leg(action: TradeAction, contracts: i32, premium: Decimal, fees: Decimal) -> OptionPosition {
        OptionPosition {
            id: 1,
            base_position_id: 1,
            position_type: LegPurpose::New,
            option_type: OptionType::Call,
            option_action: action,
            strike_price: Decimal::from(160),
            expiration_date: date(2026, 11, 20),
            contracts,
            premium_per_contract: premium,
            fees_commissions: fees,
            trade_date: date(2026, 10, 1),
            is_open: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stock_leg(action: TradeAction, shares: i32, price: Decimal, fees: Decimal) -> StockSharePosition {
        StockSharePosition {
            id: 1,
            base_position_id: 1,
            action,
            shares,
            share_price: price,
            fees_commissions: fees,
            trade_date: date(2026, 10, 1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_legs_is_all_zero() {
        assert_eq!(compute_totals(&[], &[]), PositionTotals::default());
    }

    #[test]
    fn test_sold_call_is_credit_fees_are_debit() {
        // 2 contracts @ 250.00 with 1.30 fees
        let leg = option_leg(TradeAction::Sell, 2, Decimal::from(250), Decimal::new(130, 2));
        let totals = compute_totals(&[leg], &[]);
        assert_eq!(totals.total_credits, Decimal::from(500));
        assert_eq!(totals.total_debits, Decimal::new(130, 2));
        assert_eq!(totals.net_position_value, Decimal::new(49870, 2));
    }

    #[test]
    fn test_bought_option_is_debit() {
        let leg = option_leg(TradeAction::Buy, 1, Decimal::from(1200), Decimal::new(65, 2));
        let flow = option_cash_flow(&leg);
        assert_eq!(flow.credit, Decimal::ZERO);
        assert_eq!(flow.debit, Decimal::new(120065, 2));
    }

    #[test]
    fn test_covered_call_net() {
        // Buy 100 shares @ 150, sell 1 call for 300, 1.00 fees on each leg
        let stock = stock_leg(TradeAction::Buy, 100, Decimal::from(150), Decimal::ONE);
        let call = option_leg(TradeAction::Sell, 1, Decimal::from(300), Decimal::ONE);
        let totals = compute_totals(&[call], &[stock]);
        assert_eq!(totals.total_credits, Decimal::from(300));
        assert_eq!(totals.total_debits, Decimal::from(15_002));
        assert_eq!(totals.net_position_value, Decimal::from(-14_702));
    }

    #[test]
    fn test_closed_legs_still_count() {
        let mut leg = option_leg(TradeAction::Sell, 1, Decimal::from(100), Decimal::ZERO);
        leg.is_open = false;
        assert_eq!(compute_totals(&[leg], &[]).total_credits, Decimal::from(100));
    }

    #[test]
    fn test_stock_sale_is_credit() {
        let leg = stock_leg(TradeAction::Sell, 50, Decimal::new(15525, 2), Decimal::new(50, 2));
        let flow = stock_cash_flow(&leg);
        assert_eq!(flow.credit, Decimal::new(776250, 2));
        assert_eq!(flow.debit, Decimal::new(50, 2));
    }
}

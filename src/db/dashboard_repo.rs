use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

/// Portfolio-level counters read straight from the stored base-position totals.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PortfolioOverview {
    pub total_positions: i64,
    pub open_positions: i64,
    pub closed_positions: i64,
    pub total_net_value: Decimal,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
}

pub async fn get_overview(pool: &PgPool) -> anyhow::Result<PortfolioOverview> {
    let overview = sqlx::query_as::<_, PortfolioOverview>(
        r#"
        SELECT
            COUNT(*) AS total_positions,
            COUNT(*) FILTER (WHERE position_status = 'open') AS open_positions,
            COUNT(*) FILTER (WHERE position_status = 'closed') AS closed_positions,
            COALESCE(SUM(net_position_value), 0) AS total_net_value,
            COALESCE(SUM(total_credits), 0) AS total_credits,
            COALESCE(SUM(total_debits), 0) AS total_debits
        FROM base_position
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(overview)
}

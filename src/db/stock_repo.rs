use sqlx::PgPool;

use crate::db::base_position_repo::refresh_totals;
use crate::models::requests::{CreateStockLeg, UpdateStockLeg};
use crate::models::StockSharePosition;

/// Stock legs newest first, optionally restricted to one base position.
pub async fn list_stocks(
    pool: &PgPool,
    base_position_id: Option<i64>,
) -> anyhow::Result<Vec<StockSharePosition>> {
    let stocks = sqlx::query_as::<_, StockSharePosition>(
        r#"
        SELECT * FROM stock_share_position
        WHERE $1::BIGINT IS NULL OR base_position_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(base_position_id)
    .fetch_all(pool)
    .await?;

    Ok(stocks)
}

pub async fn get_stock(pool: &PgPool, id: i64) -> anyhow::Result<Option<StockSharePosition>> {
    let stock = sqlx::query_as::<_, StockSharePosition>(
        "SELECT * FROM stock_share_position WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(stock)
}

/// Insert a stock leg and refresh its parent's totals in one transaction.
pub async fn create_stock(pool: &PgPool, req: &CreateStockLeg) -> anyhow::Result<StockSharePosition> {
    let mut tx = pool.begin().await?;
    let terms = &req.terms;

    let stock = sqlx::query_as::<_, StockSharePosition>(
        r#"
        INSERT INTO stock_share_position (
            base_position_id, action, shares, share_price, fees_commissions, trade_date
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(req.base_position_id)
    .bind(terms.action)
    .bind(terms.shares)
    .bind(terms.share_price)
    .bind(terms.fees_commissions)
    .bind(terms.trade_date)
    .fetch_one(&mut *tx)
    .await?;

    refresh_totals(&mut tx, stock.base_position_id).await?;
    tx.commit().await?;

    Ok(stock)
}

/// Replace every field of a stock leg except its owner.
pub async fn update_stock(
    pool: &PgPool,
    id: i64,
    req: &UpdateStockLeg,
) -> anyhow::Result<Option<StockSharePosition>> {
    let mut tx = pool.begin().await?;
    let terms = &req.terms;

    let updated = sqlx::query_as::<_, StockSharePosition>(
        r#"
        UPDATE stock_share_position
        SET action = $2,
            shares = $3,
            share_price = $4,
            fees_commissions = $5,
            trade_date = $6,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(terms.action)
    .bind(terms.shares)
    .bind(terms.share_price)
    .bind(terms.fees_commissions)
    .bind(terms.trade_date)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(stock) = updated else {
        return Ok(None);
    };

    refresh_totals(&mut tx, stock.base_position_id).await?;
    tx.commit().await?;

    Ok(Some(stock))
}

pub async fn delete_stock(pool: &PgPool, id: i64) -> anyhow::Result<bool> {
    let mut tx = pool.begin().await?;

    let deleted: Option<(i64,)> =
        sqlx::query_as("DELETE FROM stock_share_position WHERE id = $1 RETURNING base_position_id")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some((base_position_id,)) = deleted else {
        return Ok(false);
    };

    refresh_totals(&mut tx, base_position_id).await?;
    tx.commit().await?;

    Ok(true)
}

use sqlx::PgPool;

use crate::db::base_position_repo::refresh_totals;
use crate::models::requests::{CreateOptionLeg, UpdateOptionLeg};
use crate::models::OptionPosition;

/// Option legs newest first, optionally restricted to one base position.
pub async fn list_options(
    pool: &PgPool,
    base_position_id: Option<i64>,
) -> anyhow::Result<Vec<OptionPosition>> {
    let options = sqlx::query_as::<_, OptionPosition>(
        r#"
        SELECT * FROM option_position
        WHERE $1::BIGINT IS NULL OR base_position_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(base_position_id)
    .fetch_all(pool)
    .await?;

    Ok(options)
}

pub async fn get_option(pool: &PgPool, id: i64) -> anyhow::Result<Option<OptionPosition>> {
    let option = sqlx::query_as::<_, OptionPosition>("SELECT * FROM option_position WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(option)
}

/// Insert an option leg and refresh its parent's totals in one transaction.
/// A missing parent surfaces as a foreign-key violation from the insert.
pub async fn create_option(pool: &PgPool, req: &CreateOptionLeg) -> anyhow::Result<OptionPosition> {
    let mut tx = pool.begin().await?;
    let terms = &req.terms;

    let option = sqlx::query_as::<_, OptionPosition>(
        r#"
        INSERT INTO option_position (
            base_position_id, position_type, option_type, option_action,
            strike_price, expiration_date, contracts, premium_per_contract,
            fees_commissions, trade_date, is_open
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(req.base_position_id)
    .bind(terms.position_type)
    .bind(terms.option_type)
    .bind(terms.option_action)
    .bind(terms.strike_price)
    .bind(terms.expiration_date)
    .bind(terms.contracts)
    .bind(terms.premium_per_contract)
    .bind(terms.fees_commissions)
    .bind(terms.trade_date)
    .bind(req.is_open)
    .fetch_one(&mut *tx)
    .await?;

    refresh_totals(&mut tx, option.base_position_id).await?;
    tx.commit().await?;

    Ok(option)
}

/// Replace every field of an option leg except its owner.
pub async fn update_option(
    pool: &PgPool,
    id: i64,
    req: &UpdateOptionLeg,
) -> anyhow::Result<Option<OptionPosition>> {
    let mut tx = pool.begin().await?;
    let terms = &req.terms;

    let updated = sqlx::query_as::<_, OptionPosition>(
        r#"
        UPDATE option_position
        SET position_type = $2,
            option_type = $3,
            option_action = $4,
            strike_price = $5,
            expiration_date = $6,
            contracts = $7,
            premium_per_contract = $8,
            fees_commissions = $9,
            trade_date = $10,
            is_open = $11,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(terms.position_type)
    .bind(terms.option_type)
    .bind(terms.option_action)
    .bind(terms.strike_price)
    .bind(terms.expiration_date)
    .bind(terms.contracts)
    .bind(terms.premium_per_contract)
    .bind(terms.fees_commissions)
    .bind(terms.trade_date)
    .bind(req.is_open)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(option) = updated else {
        return Ok(None);
    };

    refresh_totals(&mut tx, option.base_position_id).await?;
    tx.commit().await?;

    Ok(Some(option))
}

/// Delete an option leg. Returns false when no such row existed.
pub async fn delete_option(pool: &PgPool, id: i64) -> anyhow::Result<bool> {
    let mut tx = pool.begin().await?;

    let deleted: Option<(i64,)> =
        sqlx::query_as("DELETE FROM option_position WHERE id = $1 RETURNING base_position_id")
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

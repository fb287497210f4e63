use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::ledger::{self, PositionTotals};
use crate::models::requests::{position_name, CreateBasePosition, UpdateBasePosition};
use crate::models::{
    BasePosition, BasePositionDetail, BasePositionSummary, OptionPosition, StockSharePosition,
};

/// All base positions, newest first, each with its leg counts.
pub async fn list_base_positions(pool: &PgPool) -> anyhow::Result<Vec<BasePositionSummary>> {
    // Correlated sub-queries: joining both leg tables at once would multiply the counts.
    let rows = sqlx::query_as::<_, BasePositionSummary>(
        r#"
        SELECT bp.*,
               (SELECT COUNT(*) FROM option_position op WHERE op.base_position_id = bp.id) AS option_count,
               (SELECT COUNT(*) FROM stock_share_position ssp WHERE ssp.base_position_id = bp.id) AS stock_count
        FROM base_position bp
        ORDER BY bp.created_at DESC, bp.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_base_position(pool: &PgPool, id: i64) -> anyhow::Result<Option<BasePosition>> {
    let position = sqlx::query_as::<_, BasePosition>("SELECT * FROM base_position WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(position)
}

/// A base position together with its option and stock legs, newest first.
pub async fn get_base_position_detail(
    pool: &PgPool,
    id: i64,
) -> anyhow::Result<Option<BasePositionDetail>> {
    let Some(position) = get_base_position(pool, id).await? else {
        return Ok(None);
    };

    let options = sqlx::query_as::<_, OptionPosition>(
        "SELECT * FROM option_position WHERE base_position_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let stocks = sqlx::query_as::<_, StockSharePosition>(
        "SELECT * FROM stock_share_position WHERE base_position_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(BasePositionDetail {
        position,
        options,
        stocks,
    }))
}

/// Insert a new open base position. The name is fixed here from the symbol,
/// the strategy and `created_on`.
pub async fn create_base_position(
    pool: &PgPool,
    req: &CreateBasePosition,
    created_on: NaiveDate,
) -> anyhow::Result<BasePosition> {
    let name = position_name(&req.symbol, req.strategy_type, created_on);

    let position = sqlx::query_as::<_, BasePosition>(
        r#"
        INSERT INTO base_position (symbol, position_name, strategy_type, underlying_price, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&req.symbol)
    .bind(name)
    .bind(req.strategy_type)
    .bind(req.underlying_price)
    .bind(&req.notes)
    .fetch_one(pool)
    .await?;

    Ok(position)
}

/// Replace every editable field. Derived totals are left alone.
pub async fn update_base_position(
    pool: &PgPool,
    id: i64,
    req: &UpdateBasePosition,
) -> anyhow::Result<Option<BasePosition>> {
    let position = sqlx::query_as::<_, BasePosition>(
        r#"
        UPDATE base_position
        SET symbol = $2,
            position_name = $3,
            strategy_type = $4,
            underlying_price = $5,
            position_status = $6,
            notes = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.symbol)
    .bind(&req.position_name)
    .bind(req.strategy_type)
    .bind(req.underlying_price)
    .bind(req.position_status)
    .bind(&req.notes)
    .fetch_optional(pool)
    .await?;

    Ok(position)
}

/// Delete a base position. Its legs go with it through `ON DELETE CASCADE`.
/// Returns false when no such row existed.
pub async fn delete_base_position(pool: &PgPool, id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM base_position WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Recompute and store the derived totals of one base position from its legs.
///
/// Must run inside the transaction that changed the legs. The parent row is
/// locked first so concurrent leg writes on the same position serialize.
/// `FOR NO KEY UPDATE` does not conflict with the key-share lock a leg insert
/// already holds through its foreign key.
pub async fn refresh_totals(
    conn: &mut PgConnection,
    base_position_id: i64,
) -> anyhow::Result<Option<PositionTotals>> {
    let locked: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM base_position WHERE id = $1 FOR NO KEY UPDATE")
            .bind(base_position_id)
            .fetch_optional(&mut *conn)
            .await?;

    if locked.is_none() {
        return Ok(None);
    }

    let options = sqlx::query_as::<_, OptionPosition>(
        "SELECT * FROM option_position WHERE base_position_id = $1",
    )
    .bind(base_position_id)
    .fetch_all(&mut *conn)
    .await?;

    let stocks = sqlx::query_as::<_, StockSharePosition>(
        "SELECT * FROM stock_share_position WHERE base_position_id = $1",
    )
    .bind(base_position_id)
    .fetch_all(&mut *conn)
    .await?;

    let totals = ledger::compute_totals(&options, &stocks);

    sqlx::query(
        r#"
        UPDATE base_position
        SET total_credits = $2,
            total_debits = $3,
            net_position_value = $4,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(base_position_id)
    .bind(totals.total_credits)
    .bind(totals.total_debits)
    .bind(totals.net_position_value)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(
        base_position_id,
        credits = %totals.total_credits,
        debits = %totals.total_debits,
        net = %totals.net_position_value,
        "Position totals refreshed"
    );

    Ok(Some(totals))
}

mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;

use common::{build_test_app, create_position, dec, option_body, seed_base_position, send};

#[tokio::test]
async fn test_overview_empty_is_all_zero() {
    let (app, _db) = build_test_app().await;

    let (status, json) = send(&app, "GET", "/api/dashboard/overview", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_positions"], 0);
    assert_eq!(json["open_positions"], 0);
    assert_eq!(json["closed_positions"], 0);
    assert_eq!(dec(&json["total_net_value"]), Decimal::ZERO);
    assert_eq!(dec(&json["total_credits"]), Decimal::ZERO);
    assert_eq!(dec(&json["total_debits"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_overview_single_position() {
    let (app, db) = build_test_app().await;
    seed_base_position(&db.pool, "AAPL", "open", Decimal::new(50000, 2), Decimal::new(130, 2)).await;

    let (_, json) = send(&app, "GET", "/api/dashboard/overview", None).await;

    assert_eq!(json["total_positions"], 1);
    assert_eq!(json["open_positions"], 1);
    assert_eq!(json["closed_positions"], 0);
    assert_eq!(dec(&json["total_credits"]), Decimal::from(500));
    assert_eq!(dec(&json["total_debits"]), Decimal::new(130, 2));
    assert_eq!(dec(&json["total_net_value"]), Decimal::new(49870, 2));
}

#[tokio::test]
async fn test_overview_sums_many_positions() {
    let (app, db) = build_test_app().await;

    let seeds = [
        ("AAPL", "open", Decimal::from(500), Decimal::from(20)),
        ("MSFT", "closed", Decimal::from(120), Decimal::from(300)),
        ("KO", "open", Decimal::new(7525, 2), Decimal::ZERO),
        ("SPY", "closed", Decimal::ZERO, Decimal::new(1999, 2)),
    ];
    for (symbol, status, credits, debits) in seeds {
        seed_base_position(&db.pool, symbol, status, credits, debits).await;
    }

    let (status, json) = send(&app, "GET", "/api/dashboard/overview", None).await;
    assert_eq!(status, StatusCode::OK);

    let credits: Decimal = seeds.iter().map(|s| s.2).sum();
    let debits: Decimal = seeds.iter().map(|s| s.3).sum();

    assert_eq!(json["total_positions"], 4);
    assert_eq!(json["open_positions"], 2);
    assert_eq!(json["closed_positions"], 2);
    assert_eq!(dec(&json["total_credits"]), credits);
    assert_eq!(dec(&json["total_debits"]), debits);
    assert_eq!(dec(&json["total_net_value"]), credits - debits);
}

#[tokio::test]
async fn test_overview_reflects_leg_writes() {
    let (app, _db) = build_test_app().await;
    let first = create_position(&app, "AAPL", "covered_call").await;
    let second = create_position(&app, "MSFT", "cash_secured_put").await;

    send(&app, "POST", "/api/options", Some(option_body(first, "sell", 1, "300.00"))).await;
    send(&app, "POST", "/api/options", Some(option_body(second, "sell", 2, "150.00"))).await;

    let (_, json) = send(&app, "GET", "/api/dashboard/overview", None).await;

    assert_eq!(json["total_positions"], 2);
    assert_eq!(json["open_positions"], 2);
    assert_eq!(dec(&json["total_credits"]), Decimal::from(600));
    assert_eq!(dec(&json["total_debits"]), Decimal::new(260, 2));
    assert_eq!(dec(&json["total_net_value"]), Decimal::new(59740, 2));
}

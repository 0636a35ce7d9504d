use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use fuse_engine::{
    fuse_types::TransactionSummary,
    traits::TransactionPage,
    ProcessorError,
    TransactionSearchApi,
};
use rust_decimal::Decimal;
use serde_json::Value;

use super::{helpers::get_request, mocks::MockProcessor};
use crate::{config::ServerOptions, routes::UncapturedPaymentsRoute};

fn summary(id: &str, approval_code: Option<&str>) -> TransactionSummary {
    TransactionSummary {
        id: id.to_string(),
        client_reference: Some("MREF-42".into()),
        submitted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        approval_code: approval_code.map(String::from),
        amount: Decimal::new(1000, 2),
        card_prefix: Some("411111".into()),
        card_suffix: Some("1111".into()),
        captured: false,
    }
}

fn register(cfg: &mut ServiceConfig, processor: MockProcessor) {
    cfg.service(UncapturedPaymentsRoute::<MockProcessor>::new())
        .app_data(web::Data::new(ServerOptions { search_days: 7 }))
        .app_data(web::Data::new(TransactionSearchApi::new(processor)));
}

#[actix_web::test]
async fn uncaptured_payments() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request("/payments/uncaptured?reference=MREF-42", configure_search).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["reference"], "MREF-42");
    assert_eq!(body["days_ago"], 7);
    let payments = body["payments"].as_array().expect("Missing payments");
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0]["reference"], "tx1");
    assert_eq!(payments[0]["paymentId"], "MREF-42");
    assert_eq!(payments[1]["reference"], "tx2");
}

fn configure_search(cfg: &mut ServiceConfig) {
    let mut processor = MockProcessor::new();
    processor
        .expect_search_transactions()
        .withf(|req| {
            req.offset == 0 && req.query.starts_with("clientReferenceInformation.code:MREF-42 AND submitTimeUtc:")
        })
        .times(1)
        .returning(|_| {
            let summaries = vec![summary("tx1", Some("831000")), summary("tx2", Some("831001")), summary("tx3", None)];
            Ok(TransactionPage::new(3, 0, summaries))
        });
    register(cfg, processor);
}

#[actix_web::test]
async fn explicit_search_window() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/payments/uncaptured?reference=MREF-42&days_ago=30", configure_empty_search)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["days_ago"], 30);
    assert!(body["payments"].as_array().unwrap().is_empty());
}

fn configure_empty_search(cfg: &mut ServiceConfig) {
    let mut processor = MockProcessor::new();
    processor.expect_search_transactions().times(1).returning(|_| Ok(TransactionPage::default()));
    register(cfg, processor);
}

#[actix_web::test]
async fn reference_is_required() {
    let _ = env_logger::try_init().ok();
    let (status, _) = get_request("/payments/uncaptured?days_ago=3", configure_no_search).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn configure_no_search(cfg: &mut ServiceConfig) {
    let mut processor = MockProcessor::new();
    processor.expect_search_transactions().never();
    register(cfg, processor);
}

#[actix_web::test]
async fn search_failure_is_not_an_empty_result() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        get_request("/payments/uncaptured?reference=MREF-42", configure_failed_search).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("timed out"), "{body}");
}

fn configure_failed_search(cfg: &mut ServiceConfig) {
    let mut processor = MockProcessor::new();
    processor
        .expect_search_transactions()
        .times(1)
        .returning(|_| Err(ProcessorError::Transport("timed out".into())));
    register(cfg, processor);
}

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use fuse_engine::{
    fuse_types::{ProcessedTransaction, RefundStatus},
    ProcessorError,
    RefundApi,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use super::{
    helpers::post_json,
    mocks::{MockLedger, MockProcessor},
};
use crate::routes::RefundRoute;

fn register(cfg: &mut ServiceConfig, ledger: MockLedger, processor: MockProcessor) {
    cfg.service(RefundRoute::<MockLedger, MockProcessor>::new())
        .app_data(web::Data::new(RefundApi::new(ledger, processor)));
}

fn ledger_with_psp1() -> MockLedger {
    let mut ledger = MockLedger::new();
    ledger
        .expect_fetch_processed_transactions()
        .withf(|reference| reference == "REF1")
        .returning(|_| Ok(vec![ProcessedTransaction::new("PSP1")]));
    ledger
}

fn processor_returning(status: RefundStatus) -> MockProcessor {
    let mut processor = MockProcessor::new();
    processor
        .expect_refund_payment()
        .withf(|client_ref, psp, amount| client_ref == "REF1" && psp == "PSP1" && *amount == Decimal::new(1000, 2))
        .times(1)
        .returning(move |_, _, _| Ok(status.clone()));
    processor
}

#[actix_web::test]
async fn successful_refund() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "REF1", "amount": "10.00"});
    let (status, body) = post_json("/refund", &body, configure_pending).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let result: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(result["succeeded"], true);
    assert_eq!(result["reference"], "REF1");
    assert!(result.get("failureReason").is_none());
}

fn configure_pending(cfg: &mut ServiceConfig) {
    register(cfg, ledger_with_psp1(), processor_returning(RefundStatus::Pending));
}

#[actix_web::test]
async fn declined_refund_is_still_ok() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "REF1", "amount": 10.0});
    let (status, body) = post_json("/refund", &body, configure_failed).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let result: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(result["succeeded"], false);
    assert!(result.get("amount").is_none());
    let reason = result["failureReason"].as_str().expect("Missing failure reason");
    assert!(reason.contains("FAILED"), "{reason}");
}

fn configure_failed(cfg: &mut ServiceConfig) {
    register(cfg, ledger_with_psp1(), processor_returning(RefundStatus::Failed));
}

#[actix_web::test]
async fn invalid_refund() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "REF1", "amount": "0"});
    let (status, body) = post_json("/refund", &body, configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Invalid refund request."#), "{body}");
}

#[actix_web::test]
async fn malformed_refund() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "REF1"});
    let (status, _) = post_json("/refund", &body, configure_untouched).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn configure_untouched(cfg: &mut ServiceConfig) {
    let mut ledger = MockLedger::new();
    ledger.expect_fetch_processed_transactions().never();
    let mut processor = MockProcessor::new();
    processor.expect_refund_payment().never();
    register(cfg, ledger, processor);
}

#[actix_web::test]
async fn processor_unavailable() {
    let _ = env_logger::try_init().ok();
    let body = json!({"reference": "REF1", "amount": "10.00"});
    let (status, _) = post_json("/refund", &body, configure_processor_down).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

fn configure_processor_down(cfg: &mut ServiceConfig) {
    let mut processor = MockProcessor::new();
    processor
        .expect_refund_payment()
        .times(1)
        .returning(|_, _, _| Err(ProcessorError::Rejected { status: 503, message: "Service unavailable".into() }));
    register(cfg, ledger_with_psp1(), processor);
}

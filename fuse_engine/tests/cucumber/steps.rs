use std::str::FromStr;

use chrono::Utc;
use cucumber::{given, then, when};
use fuse_engine::{
    fuse_types::{AuthResult, Refund, RefundStatus, TransactionSummary},
    NotificationError,
};
use rust_decimal::Decimal;

use crate::cucumber::FuseWorld;

fn amount(s: &str) -> Decimal {
    Decimal::from_str(s).expect("Not a valid amount")
}

fn transaction(id: &str, reference: &str, approval_code: Option<&str>) -> TransactionSummary {
    TransactionSummary {
        id: id.to_string(),
        client_reference: Some(reference.to_string()),
        submitted_at: Utc::now(),
        approval_code: approval_code.map(String::from),
        amount: Decimal::new(1000, 2),
        card_prefix: Some("411111".into()),
        card_suffix: Some("1111".into()),
        captured: false,
    }
}

//---------------------------------------------  Notifications  -----------------------------------------------------

#[given(expr = "the merchant secret key is {string}")]
async fn merchant_secret_key(world: &mut FuseWorld, key: String) {
    world.secret_key = key;
}

#[given(expr = "the signed fields are {string}")]
async fn signed_fields(world: &mut FuseWorld, fields: String) {
    world.signed_fields = Some(fields.parse().expect("Infallible"));
}

#[given(expr = "the notification field {word} is {string}")]
async fn notification_field(world: &mut FuseWorld, name: String, value: String) {
    world.notification.insert(name, value);
}

#[given(expr = "the notification is signed with {string}")]
async fn notification_signature(world: &mut FuseWorld, signature: String) {
    world.notification.insert("MerchantSignature", signature);
}

#[when("the notification is handled")]
async fn handle_notification(world: &mut FuseWorld) {
    let fields = world.signed_fields.clone().expect("Signed fields have not been configured");
    let params = world.notification.clone();
    let result = world.notification_api().handle(params, &fields, world.secret_key.as_bytes()).await;
    world.notification_result = Some(result);
}

#[then("the notification is accepted")]
async fn notification_accepted(world: &mut FuseWorld) {
    match &world.notification_result {
        Some(Ok(_)) => {},
        Some(Err(e)) => panic!("The notification was rejected: {e}"),
        None => panic!("No notification has been handled"),
    }
}

#[then(expr = "the notification is rejected with {string}")]
async fn notification_rejected(world: &mut FuseWorld, message: String) {
    match &world.notification_result {
        Some(Err(e @ NotificationError::PaymentValidation(_))) => assert_eq!(e.to_string(), message),
        Some(Err(e)) => panic!("The notification failed, but not validation: {e}"),
        Some(Ok(_)) => panic!("The notification was accepted"),
        None => panic!("No notification has been handled"),
    }
}

#[then(expr = "the ledger received {int} submission(s)")]
async fn ledger_submissions(world: &mut FuseWorld, count: usize) {
    assert_eq!(world.ledger.submissions().len(), count);
}

#[then(expr = "the ledger recorded {word} for merchant reference {string}")]
async fn ledger_auth_result(world: &mut FuseWorld, auth_result: String, reference: String) {
    let submissions = world.ledger.submissions();
    let (submitted_ref, model) = submissions.last().expect("Nothing was submitted to the ledger");
    assert_eq!(submitted_ref, &reference);
    assert_eq!(model.auth_result.to_string(), auth_result);
}

#[then(expr = "the ledger submission carries PSP reference {string} and payment method {string}")]
async fn ledger_processor_details(world: &mut FuseWorld, psp_reference: String, payment_method: String) {
    let submissions = world.ledger.submissions();
    let (_, model) = submissions.last().expect("Nothing was submitted to the ledger");
    assert_eq!(model.auth_result, AuthResult::Authorised);
    assert_eq!(model.psp_reference.as_deref(), Some(psp_reference.as_str()));
    assert_eq!(model.payment_method.as_deref(), Some(payment_method.as_str()));
}

#[then("the ledger submission carries no processor details")]
async fn ledger_no_processor_details(world: &mut FuseWorld) {
    let submissions = world.ledger.submissions();
    let (_, model) = submissions.last().expect("Nothing was submitted to the ledger");
    assert!(model.psp_reference.is_none());
    assert!(model.payment_method.is_none());
}

//---------------------------------------------     Refunds     -----------------------------------------------------

#[given(expr = "the ledger has processed transaction {string} for {string}")]
async fn ledger_processed_transaction(world: &mut FuseWorld, psp_reference: String, reference: String) {
    world.ledger.add_processed_transaction(&reference, &psp_reference);
}

#[given(expr = "the processor responds to refunds with {string}")]
async fn processor_refund_status(world: &mut FuseWorld, status: String) {
    world.processor.set_refund_status(RefundStatus::from_processor_code(&status));
}

#[given(expr = "the processor has an authorised transaction {string} for {string}")]
async fn processor_authorised_transaction(world: &mut FuseWorld, id: String, reference: String) {
    world.processor.add_transaction(transaction(&id, &reference, Some("831000")));
}

#[given(expr = "the processor has an unauthorised transaction {string} for {string}")]
async fn processor_unauthorised_transaction(world: &mut FuseWorld, id: String, reference: String) {
    world.processor.add_transaction(transaction(&id, &reference, None));
}

#[when(expr = "I request a refund of {word} for {string}")]
async fn request_refund(world: &mut FuseWorld, value: String, reference: String) {
    let refund = Refund::new(reference, amount(&value));
    let result = world.refund_api().handle(refund).await;
    world.refund_result = Some(result);
}

#[then(expr = "the refund succeeds for {string} with amount {word}")]
async fn refund_succeeds(world: &mut FuseWorld, reference: String, value: String) {
    let result = world.refund_result();
    assert!(result.succeeded(), "Refund failed: {:?}", result.failure_reason());
    assert_eq!(result.reference(), Some(reference.as_str()));
    assert_eq!(result.amount(), Some(amount(&value)));
    assert!(result.failure_reason().is_none());
}

#[then(expr = "the refund fails with a reason mentioning {string}")]
async fn refund_fails(world: &mut FuseWorld, fragment: String) {
    let result = world.refund_result();
    assert!(!result.succeeded());
    assert!(result.amount().is_none());
    let reason = result.failure_reason().expect("A failed refund must carry a reason");
    assert!(reason.contains(&fragment), "'{reason}' does not mention '{fragment}'");
}

#[then(expr = "the processor received a refund of {word} against {string}")]
async fn processor_received_refund(world: &mut FuseWorld, value: String, psp_reference: String) {
    let refunds = world.processor.refunds();
    assert_eq!(refunds.len(), 1, "Expected exactly one refund request");
    let (_, psp, refunded) = &refunds[0];
    assert_eq!(psp, &psp_reference);
    assert_eq!(*refunded, amount(&value));
}

#[then("the processor received no refunds")]
async fn processor_received_no_refunds(world: &mut FuseWorld) {
    assert!(world.processor.refunds().is_empty());
}

//---------------------------------------------     Search      -----------------------------------------------------

#[when(expr = "I search for uncaptured payments for {string} over the last {int} day(s)")]
async fn search_uncaptured(world: &mut FuseWorld, reference: String, days: u32) {
    let payments = world.search_api().search_uncaptured(&reference, days).await.expect("Search failed");
    world.search_result = Some(payments);
}

#[then(expr = "the search returns {int} payment(s)")]
async fn search_count(world: &mut FuseWorld, count: usize) {
    let payments = world.search_result.as_ref().expect("No search has been run");
    assert_eq!(payments.len(), count);
}

#[then(expr = "the search includes transaction {string}")]
async fn search_includes(world: &mut FuseWorld, id: String) {
    let payments = world.search_result.as_ref().expect("No search has been run");
    assert!(payments.iter().any(|p| p.reference == id), "Transaction {id} is missing from the search results");
}

#[then(expr = "the processor was queried with {string}")]
async fn processor_query(world: &mut FuseWorld, query: String) {
    assert!(world.processor.queries().contains(&query), "Queries were: {:?}", world.processor.queries());
}

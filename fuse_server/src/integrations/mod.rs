//! Concrete clients for the engine's collaborators.
//!
//! * [`ledger::LedgerClient`] talks to the merchant ledger's REST API.
//! * [`cybersource::CybersourceProcessor`] adapts the Cybersource REST client to the engine's `PaymentProcessor`.
pub mod cybersource;
pub mod ledger;

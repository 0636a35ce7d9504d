//! # External collaborators
//!
//! The engine never talks to the outside world directly. Everything it needs from the merchant's ledger and from the
//! card processor is expressed as a trait here, and the server supplies the concrete REST clients.
//!
//! ## Traits
//! * [`LedgerManagement`] records settled payments against a merchant reference and reports which processor
//!   transactions the ledger already knows about.
//! * [`PaymentProcessor`] issues refunds and searches the processor's transaction history.
mod data_objects;
mod ledger_management;
mod payment_processor;

pub use data_objects::TransactionPage;
pub use ledger_management::{LedgerError, LedgerManagement};
pub use payment_processor::{PaymentProcessor, ProcessorError};

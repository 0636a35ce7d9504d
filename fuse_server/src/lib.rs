//! # Fuse payment server
//! This crate hosts the HTTP front end of the Fuse payment adapter. It is responsible for:
//! * Receiving the payment notifications that the gateway posts back after a customer pays, verifying them and
//!   reporting the outcome to the merchant ledger.
//! * Accepting refund requests and passing them on to the card processor.
//! * Searching the processor for authorised payments that need reconciling.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/payment-response`: The gateway's payment notification (form-encoded).
//! * `/refund`: Refund a payment by merchant reference.
//! * `/payments/uncaptured`: Search for authorised payments.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;

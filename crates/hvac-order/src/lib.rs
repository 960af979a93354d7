//! # hvac-order -- Typed client for the storefront `order-validate` function
//!
//! The storefront never trusts its own cart totals at checkout. Before a
//! payment is started it asks the server-side `order-validate` function
//! whether the cart's quantities and unit prices are still current, and
//! reconciles the local cart with the verdict.
//!
//! This crate provides both halves:
//!
//! - [`CartValidationClient`] performs the single round-trip
//!   (`POST {base_url}/functions/v1/order-validate`).
//! - [`checkout`] turns a [`ValidationResult`] into a [`CheckoutDecision`]
//!   and re-prices local cart lines from the server's figures.
//!
//! ## Failure Model
//!
//! Every call is a single attempt. There is no retry, no cache and no
//! de-duplication of concurrent identical requests. Every failure is
//! surfaced to the caller as an [`OrderValidationError`]:
//!
//! | Kind | When |
//! |------|------|
//! | `Config` | URL or token missing/invalid, raised before any I/O |
//! | `Http` | transport failure (connect, reset, timeout) |
//! | `Rejected` | non-2xx status; message is the raw body text |
//! | `Deserialization` | 2xx with a body that is not a valid verdict |

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use checkout::{
    apply_server_pricing, assess_validation, cart_subtotal, CartLine, CheckoutDecision,
    StockAdjustment,
};
pub use client::CartValidationClient;
pub use config::ValidationConfig;
pub use error::{ConfigError, OrderValidationError};
pub use types::{
    Mismatch, StockIssue, Totals, ValidateCartRequest, ValidationItem, ValidationResult,
};

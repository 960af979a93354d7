//! # hvac-cli — CLI Tool for the HVAC storefront
//!
//! Provides the `hvac` command-line interface. Configuration comes from the
//! same variables the storefront frontend is deployed with
//! (`VITE_SUPABASE_URL`, `VITE_SUPABASE_ANON_KEY`).
//!
//! ## Subcommands
//!
//! - `hvac validate` — Ask the `order-validate` function for a verdict on a
//!   cart and, given the local subtotal, print the checkout decision.
//!
//! ```bash
//! hvac validate --cart-id 6f1c... --local-subtotal 2923.50
//! hvac -v validate --user-id 9b2e...
//! ```

pub mod validate;

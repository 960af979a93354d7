//! Checkout-side reconciliation of a validation verdict.
//!
//! Before starting a payment the storefront compares the server's verdict
//! with its local cart:
//!
//! 1. Stock problems win. Every reported product is either removed from the
//!    cart or clamped to the available quantity, and the customer is sent
//!    back to review.
//! 2. Otherwise, a subtotal that drifted by more than one cent means the
//!    server's prices must be applied locally and confirmed by the customer.
//!    A verdict without totals counts as no drift.
//! 3. Otherwise checkout proceeds with the local subtotal.
//!
//! Amounts are compared after rounding to two decimals.

use serde::{Deserialize, Serialize};

use crate::types::{ValidationItem, ValidationResult};

/// Largest subtotal or unit-price drift treated as "unchanged".
pub const PRICE_TOLERANCE: f64 = 0.01;

/// A line of the locally held cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Sum of `unit_price * quantity` over the cart.
pub fn cart_subtotal(lines: &[CartLine]) -> f64 {
    lines
        .iter()
        .map(|l| l.unit_price * f64::from(l.quantity))
        .sum()
}

/// Change the storefront must make to a cart line after a stock issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StockAdjustment {
    Remove { product_id: String },
    SetQuantity { product_id: String, quantity: u32 },
}

/// What checkout should do with a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum CheckoutDecision {
    /// Verdict agrees with the local cart.
    Proceed { subtotal: f64 },
    /// Some products are short on stock; adjust the cart and return to review.
    StockAdjusted { adjustments: Vec<StockAdjustment> },
    /// Server prices differ; apply them and ask the customer to confirm.
    PriceChanged {
        server_subtotal: f64,
        local_subtotal: f64,
    },
}

impl CheckoutDecision {
    pub fn can_proceed(&self) -> bool {
        matches!(self, Self::Proceed { .. })
    }
}

/// Decide how checkout continues given the server's verdict and the local
/// cart subtotal.
///
/// Stock figures are read as whole units: an available quantity below one
/// (including fractions such as `0.5`) removes the line.
pub fn assess_validation(result: &ValidationResult, local_subtotal: f64) -> CheckoutDecision {
    let stock_issues = result.stock_issues();
    if !stock_issues.is_empty() {
        let adjustments = stock_issues
            .iter()
            .map(|issue| match issue.available_quantity() {
                Some(quantity) if quantity > 0 => StockAdjustment::SetQuantity {
                    product_id: issue.product_id.clone(),
                    quantity,
                },
                _ => StockAdjustment::Remove {
                    product_id: issue.product_id.clone(),
                },
            })
            .collect();
        return CheckoutDecision::StockAdjusted { adjustments };
    }

    let server_subtotal = result.subtotal().unwrap_or(local_subtotal);
    if (server_subtotal - local_subtotal).abs() > PRICE_TOLERANCE {
        return CheckoutDecision::PriceChanged {
            server_subtotal: round2(server_subtotal),
            local_subtotal,
        };
    }

    CheckoutDecision::Proceed {
        subtotal: local_subtotal,
    }
}

/// Apply server unit prices to the local cart.
///
/// Only lines whose price differs from the server's by more than
/// [`PRICE_TOLERANCE`] are touched, so applying the same verdict twice
/// changes nothing the second time. Returns the ids of changed products,
/// each once, in cart order.
pub fn apply_server_pricing(lines: &mut [CartLine], items: &[ValidationItem]) -> Vec<String> {
    let mut changed = Vec::new();
    for line in lines.iter_mut() {
        let Some(server_price) = items
            .iter()
            .filter(|i| i.product_id == line.product_id && i.unit_price.is_finite())
            .map(|i| round2(i.unit_price))
            .last()
        else {
            continue;
        };
        if nearly_equal(line.unit_price, server_price) {
            continue;
        }
        tracing::debug!(
            product_id = %line.product_id,
            from = line.unit_price,
            to = server_price,
            "applying server unit price"
        );
        line.unit_price = server_price;
        if !changed.contains(&line.product_id) {
            changed.push(line.product_id.clone());
        }
    }
    changed
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

fn nearly_equal(a: f64, b: f64) -> bool {
    (round2(a) - round2(b)).abs() <= PRICE_TOLERANCE
}

//! Wire types for the `order-validate` function.
//!
//! The verdict is produced entirely by the server; the client deserializes
//! it and hands it back unchanged. Fields are lenient so an incomplete
//! verdict still deserializes, fields the server may leave out are `Option`
//! so re-serializing does not invent them, and fields this crate does not
//! model are kept in `extra` maps. Re-serializing a verdict yields the JSON
//! the server sent.

use serde::{Deserialize, Serialize, Serializer};

/// Opaque discrepancy record reported by the server.
///
/// The server has not published a schema for mismatches, so they are kept
/// as plain JSON objects.
pub type Mismatch = serde_json::Map<String, serde_json::Value>;

/// Request body for `POST /functions/v1/order-validate`.
///
/// Absent identifiers are omitted from the body, not sent as placeholders.
/// Whether "neither provided" is acceptable is decided by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateCartRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ValidateCartRequest {
    /// Validate a server-side cart by its id.
    pub fn for_cart(cart_id: impl Into<String>) -> Self {
        Self {
            cart_id: Some(cart_id.into()),
            user_id: None,
        }
    }

    /// Validate the active cart of a user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            cart_id: None,
            user_id: Some(user_id.into()),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// One cart line as priced by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub product_id: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, serialize_with = "serialize_js_number")]
    pub unit_price: f64,
    #[serde(default)]
    pub price_list_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ValidationItem {
    pub fn new(product_id: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
            price_list_id: None,
            extra: serde_json::Map::new(),
        }
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Aggregate figures of a verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default, serialize_with = "serialize_js_number")]
    pub subtotal: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Totals {
    pub fn new(subtotal: f64) -> Self {
        Self {
            subtotal,
            extra: serde_json::Map::new(),
        }
    }
}

/// A product whose available stock is below the requested quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockIssue {
    pub product_id: String,
    /// Quantity held in the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<serde_json::Value>,
    /// Number or numeric string, depending on the server version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StockIssue {
    pub fn new(product_id: impl Into<String>, available: serde_json::Value) -> Self {
        Self {
            product_id: product_id.into(),
            requested: None,
            available: Some(available),
            extra: serde_json::Map::new(),
        }
    }

    /// Available quantity, if the server reported a usable figure.
    ///
    /// Negative and fractional figures are truncated toward zero (cart
    /// quantities are whole units, so `0.5` available reads as `0`);
    /// anything that is not a finite number yields `None`.
    pub fn available_quantity(&self) -> Option<u32> {
        whole_quantity(self.available.as_ref()?)
    }

    /// Requested quantity, read the same way as [`Self::available_quantity`].
    pub fn requested_quantity(&self) -> Option<u32> {
        whole_quantity(self.requested.as_ref()?)
    }
}

fn whole_quantity(value: &serde_json::Value) -> Option<u32> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Writes whole amounts without a fractional part, as the server's JSON
/// encoder does (`42`, not `42.0`).
fn serialize_js_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // 2^53: beyond this an f64 no longer holds every integer.
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() < MAX_SAFE {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

/// The server's verdict on a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub items: Vec<ValidationItem>,
    #[serde(default)]
    pub mismatches: Vec<Mismatch>,
    /// Absent on some server answers; callers fall back to their own total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<Totals>,
    /// Absent when the server found nothing in the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_issues: Option<Vec<StockIssue>>,
    /// Top-level fields not modelled above, returned untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ValidationResult {
    /// Server line for a product, if it is part of the verdict.
    pub fn item(&self, product_id: &str) -> Option<&ValidationItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }

    /// Server subtotal, if the verdict carries totals.
    pub fn subtotal(&self) -> Option<f64> {
        self.totals.as_ref().map(|t| t.subtotal)
    }

    /// Reported stock issues; empty when the server sent none.
    pub fn stock_issues(&self) -> &[StockIssue] {
        self.stock_issues.as_deref().unwrap_or_default()
    }
}

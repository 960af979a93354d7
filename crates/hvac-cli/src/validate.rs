//! # Validate Subcommand
//!
//! Sends one `order-validate` request and prints the verdict as JSON. With
//! `--local-subtotal` the verdict is also reconciled against the caller's
//! cart and the resulting checkout decision is printed alongside it.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hvac_order::{
    assess_validation, CartValidationClient, CheckoutDecision, ValidateCartRequest,
    ValidationConfig, ValidationResult,
};

/// Arguments for the `hvac validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Server-side cart id.
    #[arg(long)]
    pub cart_id: Option<String>,

    /// Owner of the cart; the server picks the user's active cart.
    #[arg(long)]
    pub user_id: Option<String>,

    /// Subtotal the caller computed locally, to reconcile against the verdict.
    #[arg(long)]
    pub local_subtotal: Option<f64>,

    /// Request timeout in seconds. Overrides VITE_ORDER_VALIDATE_TIMEOUT_SECS.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ValidateArgs {
    fn request(&self) -> ValidateCartRequest {
        ValidateCartRequest {
            cart_id: self.cart_id.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Output of `hvac validate`.
#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub verdict: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<CheckoutDecision>,
}

impl ValidateReport {
    pub fn new(verdict: ValidationResult, local_subtotal: Option<f64>) -> Self {
        let decision = local_subtotal.map(|subtotal| assess_validation(&verdict, subtotal));
        Self { verdict, decision }
    }

    /// 0 when the verdict is ok and checkout may proceed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        let proceed = self.decision.as_ref().map_or(true, CheckoutDecision::can_proceed);
        if self.verdict.ok && proceed {
            0
        } else {
            1
        }
    }
}

/// Execute the validate subcommand against the given configuration.
///
/// Returns exit code: 0 when the cart is valid, 1 when the server or the
/// reconciliation flags it. Transport, configuration and protocol failures
/// are returned as errors.
pub async fn run_validate(args: &ValidateArgs, mut config: ValidationConfig) -> Result<u8> {
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    if args.cart_id.is_none() && args.user_id.is_none() {
        tracing::warn!("neither --cart-id nor --user-id given; the server decides which cart to validate");
    }

    let client = CartValidationClient::new(config).context("failed to build validation client")?;
    tracing::info!(endpoint = %client.endpoint(), "validating cart");

    let verdict = client
        .validate_cart(&args.request())
        .await
        .context("order validation failed")?;

    let report = ValidateReport::new(verdict, args.local_subtotal);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to render report")?
    );

    Ok(report.exit_code())
}

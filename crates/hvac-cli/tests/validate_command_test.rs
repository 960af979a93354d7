//! End-to-end tests for `hvac validate` against a mocked order-validate
//! function.

use hvac_cli::validate::{run_validate, ValidateArgs};
use hvac_order::ValidationConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn args(cart_id: &str, local_subtotal: Option<f64>) -> ValidateArgs {
    ValidateArgs {
        cart_id: Some(cart_id.into()),
        user_id: None,
        local_subtotal,
        timeout_secs: Some(5),
    }
}

async fn mount_verdict(server: &MockServer, ok: bool, subtotal: f64) {
    Mock::given(method("POST"))
        .and(path("/functions/v1/order-validate"))
        .and(body_json(json!({ "cart_id": "c1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": ok,
            "items": [{ "product_id": "air-curtain-90", "quantity": 1, "unit_price": subtotal, "price_list_id": null }],
            "mismatches": [],
            "totals": { "subtotal": subtotal },
            "cart_id": "c1"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn valid_cart_exits_zero() {
    let server = MockServer::start().await;
    mount_verdict(&server, true, 899.9).await;

    let config = ValidationConfig::new(&server.uri(), "anon").unwrap();
    let code = run_validate(&args("c1", Some(899.9)), config).await.unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn price_drift_exits_one() {
    let server = MockServer::start().await;
    mount_verdict(&server, true, 949.9).await;

    let config = ValidationConfig::new(&server.uri(), "anon").unwrap();
    let code = run_validate(&args("c1", Some(899.9)), config).await.unwrap();
    assert_eq!(code, 1);
}

#[tokio::test]
async fn server_rejection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/order-validate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("cart not found"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ValidationConfig::new(&server.uri(), "anon").unwrap();
    let err = run_validate(&args("c1", None), config).await.unwrap_err();
    assert!(format!("{err:#}").contains("cart not found"));
}

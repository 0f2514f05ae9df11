//! Integration tests for the Bold client against a mocked API.
//!
//! Uses `wiremock` to stand in for the Bold integrations host and checks the full
//! build, execute, classify and decode path of every operation.

use std::time::Duration;

use boldco::{
    Amount, ApiKey, BoldClient, BoldError, CreateIntegrationPayment, CreatePaymentLink, Email,
    ErrorKind, PaymentLink, PaymentLinkId, PaymentLinkStatus, PaymentMethod, Response, Tax,
    Terminal, TerminalStatus,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const API_KEY: &str = "test_key";

fn client_for(server: &MockServer) -> BoldClient {
    BoldClient::builder(ApiKey::new(API_KEY).unwrap())
        .base_url(server.uri())
        .http_client(reqwest::Client::new())
        .build()
        .unwrap()
}

fn close_link() -> CreatePaymentLink {
    CreatePaymentLink::close(Amount::cop(10000.0).with_tax(Tax::vat(8403.0, 1597.0)))
        .payment_methods(vec![PaymentMethod::Pse])
}

fn close_link_body() -> serde_json::Value {
    json!({
        "amount_type": "CLOSE",
        "amount": {
            "currency": "COP",
            "total_amount": 10000.0,
            "tip_amount": 0.0,
            "taxes": [{"type": "VAT", "base": 8403.0, "value": 1597.0}]
        },
        "payment_methods": ["PSE"]
    })
}

// ============================================================================
// PAYMENT LINKS
// ============================================================================

mod payment_link_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_payment_link_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/online/link/v1"))
            .and(header("authorization", "x-api-key test_key"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .and(body_json(close_link_body()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {"payment_link": "LNK_1", "url": "https://pay.example/LNK_1"},
                "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let link = client_for(&server)
            .create_payment_link(&close_link())
            .await
            .unwrap();

        assert_eq!(link.payment_link, "LNK_1");
        assert_eq!(link.url, "https://pay.example/LNK_1");
        assert_eq!(link.id().unwrap().as_str(), "LNK_1");
    }

    #[tokio::test]
    async fn test_create_payment_link_validation_keeps_partial_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/online/link/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {},
                "errors": [{"amount_type": "value is not a valid enumeration member"}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_payment_link(&close_link())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        let errors = err.field_errors().unwrap();
        assert_eq!(
            errors.message("amount_type"),
            Some("value is not a valid enumeration member")
        );
        assert_eq!(
            err.into_partial(),
            Some(Response::PaymentLink(PaymentLink::default()))
        );
    }

    #[tokio::test]
    async fn test_not_found_keeps_raw_body_and_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/online/link/v1/LNK_404"))
            .respond_with(
                ResponseTemplate::new(404)
                    .insert_header("x-request-id", "req-42")
                    .set_body_string(r#"{"message":"not found"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_payment_link(&PaymentLinkId::new("LNK_404").unwrap())
            .await
            .unwrap_err();

        match err {
            BoldError::RemoteRejected {
                status,
                body,
                headers,
            } => {
                assert_eq!(status, 404);
                assert_eq!(body, br#"{"message":"not found"}"#);
                assert_eq!(headers["x-request-id"], "req-42");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_payment_link_reads_unwrapped_details() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/online/link/v1/LNK_1"))
            .and(header("authorization", "x-api-key test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "api_version": 1,
                "id": "LNK_1",
                "total": 10000,
                "subtotal": 8403,
                "tip_amount": 0,
                "taxes": [{"type": "VAT", "base": 8403, "value": 1597}],
                "status": "ACTIVE",
                "expiration_date": null,
                "creation_date": 1700000000000000000_i64,
                "description": "Order 42",
                "payment_method": "PSE",
                "amount_type": "CLOSE",
                "is_sandbox": true
            })))
            .mount(&server)
            .await;

        let details = client_for(&server)
            .get_payment_link(&PaymentLinkId::new("LNK_1").unwrap())
            .await
            .unwrap();

        assert_eq!(details.id, "LNK_1");
        assert_eq!(details.status, PaymentLinkStatus::Active);
        assert!(details.expiration_date.is_null());
        assert!(details.transaction_id.is_absent());
        assert_eq!(details.description.as_option().map(String::as_str), Some("Order 42"));
        assert_eq!(details.payment_method.into_option(), Some(PaymentMethod::Pse));
        assert_eq!(details.creation_date.value(), 1_700_000_000_000_000_000);
        assert_eq!(details.taxes.len(), 1);
    }

    #[tokio::test]
    async fn test_payment_link_methods_decode_limits() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/online/link/v1/payment_methods"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {
                    "payment_methods": {
                        "CREDIT_CARD": {"min": 1000, "max": 10000000},
                        "PSE": {"min": 1000, "max": 5000000}
                    }
                },
                "errors": []
            })))
            .mount(&server)
            .await;

        let methods = client_for(&server)
            .get_payment_link_methods()
            .await
            .unwrap();

        assert_eq!(methods.payment_methods.len(), 2);
        assert_eq!(methods.payment_methods[&PaymentMethod::Pse].max, 5_000_000);
    }
}

// ============================================================================
// INTEGRATIONS (TERMINALS)
// ============================================================================

mod integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_integration_payment_posts_checkout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payments/app-checkout"))
            .and(body_json(json!({
                "amount": {"currency": "COP", "total_amount": 1000.0, "tip_amount": 0.0},
                "user_email": "seller@merchant.com",
                "payment_method": "POS",
                "terminal_model": "N86",
                "terminal_serial": "N860W000000",
                "reference": "ref-1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "payload": {"integration_id": "INT_1"},
                "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateIntegrationPayment::new(
            Amount::cop(1000.0),
            Email::new("seller@merchant.com").unwrap(),
            Terminal::new("N86", "N860W000000").unwrap(),
            "ref-1",
        )
        .unwrap()
        .payment_method(PaymentMethod::Pos);

        let payment = client_for(&server)
            .create_integration_payment(&request)
            .await
            .unwrap();
        assert_eq!(payment.integration_id, "INT_1");
    }

    #[tokio::test]
    async fn test_bound_terminals_and_methods() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/binded-terminals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {
                    "available_terminals": [{
                        "terminal_model": "N86",
                        "terminal_serial": "N860W000000",
                        "status": "BINDED",
                        "name": "Front desk"
                    }]
                },
                "errors": []
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/payments/payment-methods"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "payload": {
                    "payment_methods": [
                        {"name": "POS", "enabled": true},
                        {"name": "NEQUI", "enabled": true},
                        {"name": "DAVIPLATA", "enabled": false}
                    ]
                },
                "errors": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let terminals = client.get_bound_terminals().await.unwrap();
        assert_eq!(terminals.terminals().len(), 1);
        assert_eq!(terminals.terminals()[0].status, TerminalStatus::Binded);

        let methods = client.get_integration_payment_methods().await.unwrap();
        assert_eq!(
            methods.enabled().cloned().collect::<Vec<_>>(),
            vec![PaymentMethod::Pos, PaymentMethod::Nequi]
        );
    }

    #[tokio::test]
    async fn test_terminal_not_available_is_remote_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payments/app-checkout"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string(r#"{"message":"terminal not available"}"#),
            )
            .mount(&server)
            .await;

        let request = CreateIntegrationPayment::new(
            Amount::cop(1000.0),
            Email::new("seller@merchant.com").unwrap(),
            Terminal::new("N86", "N860W000000").unwrap(),
            "ref-2",
        )
        .unwrap();

        let err = client_for(&server)
            .create_integration_payment(&request)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteRejected);
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_retryable());
    }
}

// ============================================================================
// TRANSPORT BEHAVIOUR
// ============================================================================

mod transport_tests {
    use super::*;

    #[tokio::test]
    async fn test_per_call_timeout_is_a_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/binded-terminals"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"payload": {}}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .with_timeout(Duration::from_millis(100))
            .get_bound_terminals()
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = BoldClient::builder(ApiKey::new(API_KEY).unwrap())
            .base_url(uri)
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();

        let err = client.get_bound_terminals().await.unwrap_err();
        assert!(matches!(err, BoldError::Network(_)));
    }

    #[tokio::test]
    async fn test_user_agent_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/payment-methods"))
            .and(header("user-agent", "boldco-tests/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payload": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = BoldClient::builder(ApiKey::new(API_KEY).unwrap())
            .base_url(server.uri())
            .user_agent("boldco-tests/1.0")
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();

        client.get_integration_payment_methods().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/binded-terminals"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_bound_terminals().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_do_not_mix_responses() {
        let server = MockServer::start().await;

        for index in 0..16_u64 {
            Mock::given(method("GET"))
                .and(path(format!("/online/link/v1/LNK_{index}")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"id": format!("LNK_{index}"), "total": index}))
                        .set_delay(Duration::from_millis(10 * (16 - index))),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        // Shared transport on purpose: every clone and every task goes through one pool.
        let client = BoldClient::builder(ApiKey::new(API_KEY).unwrap())
            .base_url(server.uri())
            .build()
            .unwrap();

        let handles = (0..16_u32)
            .map(|index| {
                let client = client.clone();
                tokio::spawn(async move {
                    let id = PaymentLinkId::new(format!("LNK_{index}")).unwrap();
                    (index, client.get_payment_link(&id).await)
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            let (index, result) = handle.await.unwrap();
            let details = result.unwrap();
            assert_eq!(details.id, format!("LNK_{index}"));
            assert_eq!(details.total, f64::from(index));
        }
    }
}

//! # Token Endpoint Client
//!
//! Requests a payment token from the merchant backend over HTTP.

use crate::config::ClientConfig;
use async_trait::async_trait;
use cashier_core::{
    PaymentError, PaymentResult, TokenRequestParameters, TokenRequester, TokenResponse,
};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Token requester backed by `reqwest`.
///
/// Sends the parameters as a JSON `POST` and makes exactly one attempt.
pub struct HttpTokenRequester {
    client: Client,
}

impl HttpTokenRequester {
    /// Create a requester with the given request timeout
    pub fn new(timeout: Duration) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create from client configuration
    pub fn from_config(config: &ClientConfig) -> PaymentResult<Self> {
        Self::new(config.http_timeout)
    }
}

#[async_trait]
impl TokenRequester for HttpTokenRequester {
    #[instrument(skip(self, params), fields(merchant_tx_id = %params.merchant_tx_id))]
    async fn request_token(
        &self,
        url: &str,
        params: &TokenRequestParameters,
    ) -> PaymentResult<TokenResponse> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Token endpoint error: status={}, body={}", status, body);
            return Err(PaymentError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }

        let token = TokenResponse::from_json(&body).map_err(|e| {
            error!("Unusable token response: {}", e);
            e
        })?;

        info!(
            "Received payment token: merchant_id={}, cashier_url={}",
            token.merchant_id, token.mobile_cashier_url
        );

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashier_core::{CustomParams, FormState, MerchantUrls, SessionId};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params() -> TokenRequestParameters {
        FormState::default().to_token_parameters(
            &SessionId::generate(),
            &MerchantUrls::new("http://127.0.0.1:8765/checkout/result", "https://m.example/n"),
            &CustomParams::default(),
        )
    }

    fn requester() -> HttpTokenRequester {
        HttpTokenRequester::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_token_request() {
        let server = MockServer::start().await;
        let params = params();

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_partial_json(json!({
                "merchantTxId": params.merchant_tx_id.as_str(),
                "currency": "EUR",
                "customParams": { "customParameter1": "Custom Param Value 1" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "merchantId": "M1",
                "mobileCashierUrl": "https://pay.example/c",
                "token": "T1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = requester()
            .request_token(&format!("{}/token", server.uri()), &params)
            .await
            .unwrap();

        assert_eq!(token, TokenResponse::new("M1", "https://pay.example/c", "T1"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_single_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .expect(1)
            .mount(&server)
            .await;

        let err = requester()
            .request_token(&format!("{}/token", server.uri()), &params())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::TokenEndpoint { status: 503, .. }));
        assert!(err.is_token_failure());
    }

    #[tokio::test]
    async fn test_missing_merchant_id_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mobileCashierUrl": "https://pay.example/c",
                "token": "T1"
            })))
            .mount(&server)
            .await;

        let err = requester()
            .request_token(&server.uri(), &params())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::MissingField { field: "merchantId" }));
    }

    #[tokio::test]
    async fn test_malformed_body_fails() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = requester()
            .request_token(&server.uri(), &params())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = requester()
            .request_token(&format!("http://{}/token", addr), &params())
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NetworkError(_)));
    }
}

//! # Checkout Links
//!
//! Builds the URL that opens the hosted cashier for one payment session.

use cashier_core::{HostedCheckoutRequest, PaymentError, PaymentResult};
use reqwest::Url;

/// Cashier URL with `merchantId`, `token`, and `myriadFlowId` appended.
///
/// Existing query parameters on the cashier URL are kept.
pub fn checkout_link(request: &HostedCheckoutRequest) -> PaymentResult<Url> {
    Url::parse_with_params(
        &request.cashier_url,
        &[
            ("merchantId", request.merchant_id.as_str()),
            ("token", request.token.as_str()),
            ("myriadFlowId", request.session_id.as_str()),
        ],
    )
    .map_err(|e| PaymentError::LaunchFailed(format!("Invalid cashier URL {}: {}", request.cashier_url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashier_core::{SessionId, TokenResponse};

    fn request(cashier_url: &str) -> HostedCheckoutRequest {
        HostedCheckoutRequest::new(
            TokenResponse::new("M1", cashier_url, "T 1"),
            SessionId::generate(),
        )
    }

    #[test]
    fn test_link_carries_all_values() {
        let request = request("https://pay.example/c");
        let link = checkout_link(&request).unwrap();
        let pairs: Vec<(String, String)> = link.query_pairs().into_owned().collect();

        assert_eq!(link.path(), "/c");
        assert_eq!(
            pairs,
            vec![
                ("merchantId".to_string(), "M1".to_string()),
                ("token".to_string(), "T 1".to_string()),
                ("myriadFlowId".to_string(), request.session_id.to_string()),
            ]
        );
    }

    #[test]
    fn test_link_keeps_existing_query() {
        let link = checkout_link(&request("https://pay.example/c?lang=en")).unwrap();
        assert!(link.as_str().starts_with("https://pay.example/c?lang=en&merchantId=M1"));
    }

    #[test]
    fn test_invalid_cashier_url() {
        assert!(matches!(
            checkout_link(&request("not a url")),
            Err(PaymentError::LaunchFailed(_))
        ));
    }
}

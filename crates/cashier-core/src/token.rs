//! # Token Types
//!
//! Request and response shapes exchanged with the merchant token endpoint,
//! and the input handed to the hosted checkout.

use crate::error::{PaymentError, PaymentResult};
use crate::ids::SessionId;
use serde::{Deserialize, Serialize};

/// Four opaque key/value pairs forwarded to the merchant backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomParams {
    pub custom_parameter1: String,
    pub custom_parameter2: String,
    pub custom_parameter3: String,
    pub custom_parameter4: String,
}

impl CustomParams {
    pub fn new(
        p1: impl Into<String>,
        p2: impl Into<String>,
        p3: impl Into<String>,
        p4: impl Into<String>,
    ) -> Self {
        Self {
            custom_parameter1: p1.into(),
            custom_parameter2: p2.into(),
            custom_parameter3: p3.into(),
            custom_parameter4: p4.into(),
        }
    }
}

impl Default for CustomParams {
    fn default() -> Self {
        Self::new(
            "Custom Param Value 1",
            "Custom Param Value 2",
            "Custom Param Value 3",
            "Custom Param Value 4",
        )
    }
}

/// Parameters sent to the token endpoint.
///
/// Built fresh on every submit; values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequestParameters {
    pub customer_id: String,
    pub currency: String,
    pub country: String,
    pub amount: String,
    pub action: String,
    pub language: String,
    pub merchant_landing_page_url: String,
    pub merchant_notification_url: String,
    pub myriad_flow_id: SessionId,
    pub merchant_tx_id: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_address_street: String,
    pub customer_address_house_name: String,
    pub customer_address_city: String,
    pub customer_address_postal_code: String,
    pub customer_address_country: String,
    pub customer_address_state: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub custom_params: CustomParams,
}

/// Raw token endpoint body; every field may be absent on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseBody {
    #[serde(default)]
    pub merchant_id: Option<String>,
    #[serde(default)]
    pub mobile_cashier_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Validated token endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub merchant_id: String,
    pub mobile_cashier_url: String,
    pub token: String,
}

impl TokenResponse {
    pub fn new(
        merchant_id: impl Into<String>,
        mobile_cashier_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            mobile_cashier_url: mobile_cashier_url.into(),
            token: token.into(),
        }
    }

    /// Parse and validate a raw response body
    pub fn from_json(body: &str) -> PaymentResult<Self> {
        let raw: TokenResponseBody = serde_json::from_str(body)?;
        Self::try_from(raw)
    }
}

fn required(value: Option<String>, field: &'static str) -> PaymentResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PaymentError::MissingField { field }),
    }
}

impl TryFrom<TokenResponseBody> for TokenResponse {
    type Error = PaymentError;

    fn try_from(raw: TokenResponseBody) -> PaymentResult<Self> {
        Ok(Self {
            merchant_id: required(raw.merchant_id, "merchantId")?,
            mobile_cashier_url: required(raw.mobile_cashier_url, "mobileCashierUrl")?,
            token: required(raw.token, "token")?,
        })
    }
}

/// Everything the hosted checkout needs, passed through unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedCheckoutRequest {
    pub merchant_id: String,
    pub cashier_url: String,
    pub token: String,
    pub session_id: SessionId,
}

impl HostedCheckoutRequest {
    pub fn new(response: TokenResponse, session_id: SessionId) -> Self {
        Self {
            merchant_id: response.merchant_id,
            cashier_url: response.mobile_cashier_url,
            token: response.token,
            session_id,
        }
    }
}

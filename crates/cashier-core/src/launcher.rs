//! # Collaborator Traits
//!
//! Seams for the two external collaborators of the payment screen:
//! the merchant token endpoint and the hosted checkout.
//!
//! ```text
//! ┌──────────────┐   request_token()   ┌────────────────────┐
//! │ PaymentScreen│ ──────────────────▶ │  TokenRequester    │
//! │              │                     └────────────────────┘
//! │              │   launch()          ┌────────────────────┐
//! │              │ ──────────────────▶ │  PaymentLauncher   │
//! └──────────────┘                     └────────────────────┘
//! ```

use crate::error::PaymentResult;
use crate::outcome::PaymentOutcome;
use crate::token::{HostedCheckoutRequest, TokenRequestParameters, TokenResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Obtains a short-lived payment token from the merchant backend.
///
/// One call performs one network request and yields exactly one result:
/// a validated `TokenResponse` or an error. Implementations must not retry.
#[async_trait]
pub trait TokenRequester: Send + Sync {
    async fn request_token(
        &self,
        url: &str,
        params: &TokenRequestParameters,
    ) -> PaymentResult<TokenResponse>;
}

/// Starts the hosted checkout and waits for its single terminal outcome.
///
/// The request values must be handed over unchanged.
#[async_trait]
pub trait PaymentLauncher: Send + Sync {
    async fn launch(&self, request: HostedCheckoutRequest) -> PaymentResult<PaymentOutcome>;

    /// Name used in logs
    fn launcher_name(&self) -> &'static str;
}

/// Type alias for a shared token requester (dynamic dispatch)
pub type BoxedTokenRequester = Arc<dyn TokenRequester>;

/// Type alias for a shared payment launcher (dynamic dispatch)
pub type BoxedPaymentLauncher = Arc<dyn PaymentLauncher>;

//! # cashier-core
//!
//! Core types and traits for the hosted cashier demo client.
//!
//! This crate provides:
//! - `FormState` and `FormDefaults` for the payment form
//! - `TokenRequestParameters` and `TokenResponse` for the token endpoint
//! - `TokenRequester` and `PaymentLauncher` traits for the two collaborators
//! - `PaymentOutcome` and `Notification` for result interpretation
//! - `PaymentScreen` tying the workflow together
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cashier_core::{FormState, MerchantUrls, PaymentScreen};
//!
//! let screen = PaymentScreen::new(FormState::default(), urls, requester, launcher);
//!
//! // Request a token, run the hosted checkout, interpret the outcome
//! let record = screen.submit().await?;
//! println!("{}", record.notification);
//! ```

pub mod error;
pub mod form;
pub mod ids;
pub mod launcher;
pub mod outcome;
pub mod screen;
pub mod token;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use form::{Action, FormDefaults, FormState, MerchantUrls};
pub use ids::{MerchantTxId, SessionId};
pub use launcher::{BoxedPaymentLauncher, BoxedTokenRequester, PaymentLauncher, TokenRequester};
pub use outcome::{FeedbackKind, Notification, PaymentOutcome};
pub use screen::{AttemptRecord, AttemptResult, PaymentScreen};
pub use token::{
    CustomParams, HostedCheckoutRequest, TokenRequestParameters, TokenResponse,
    TokenResponseBody,
};

//! # cashier-client
//!
//! Network-facing collaborators for the hosted cashier demo.
//!
//! This crate provides:
//!
//! 1. **HttpTokenRequester** - merchant token endpoint client
//!    - JSON `POST` of the form values
//!    - single attempt, configurable timeout
//!
//! 2. **LoopbackLauncher** - hosted checkout in the browser
//!    - prints the checkout link
//!    - captures the redirect to the landing page on a loopback listener
//!
//! 3. **PromptLauncher** - hosted checkout with a typed-in outcome
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cashier_client::{ClientConfig, HttpTokenRequester, LoopbackLauncher};
//! use cashier_core::{FormState, PaymentScreen};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::from_env()?;
//! let screen = PaymentScreen::new(
//!     FormState::default(),
//!     config.merchant_urls(),
//!     Arc::new(HttpTokenRequester::from_config(&config)?),
//!     Arc::new(LoopbackLauncher::from_config(&config)?),
//! );
//!
//! let record = screen.submit().await?;
//! ```

pub mod config;
pub mod links;
pub mod loopback;
pub mod prompt;
pub mod token_client;

// Re-exports
pub use config::ClientConfig;
pub use links::checkout_link;
pub use loopback::LoopbackLauncher;
pub use prompt::PromptLauncher;
pub use token_client::HttpTokenRequester;

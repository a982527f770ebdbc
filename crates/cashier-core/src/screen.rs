//! # Payment Screen
//!
//! Drives one payment attempt: form → token request → hosted checkout →
//! outcome → order id reset. The screen owns the session identifier, the
//! merchant callback URLs, and the form; at most one attempt runs at a time.

use crate::error::{PaymentError, PaymentResult};
use crate::form::{FormState, MerchantUrls};
use crate::ids::SessionId;
use crate::launcher::{BoxedPaymentLauncher, BoxedTokenRequester};
use crate::outcome::{Notification, PaymentOutcome};
use crate::token::{CustomParams, HostedCheckoutRequest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, instrument, warn};

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "outcome")]
pub enum AttemptResult {
    /// No token; the hosted checkout was never started
    TokenFailed,
    /// The hosted checkout reported an outcome
    Completed(PaymentOutcome),
}

/// Summary of one finished attempt
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    /// Order id sent with the token request
    pub merchant_tx_id: String,
    pub result: AttemptResult,
    pub notification: Notification,
    /// Order id now in the form
    pub next_order_id: String,
    pub submitted_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self.result {
            AttemptResult::Completed(outcome) => Some(outcome),
            AttemptResult::TokenFailed => None,
        }
    }
}

/// Clears the in-flight flag when the attempt ends, however it ends
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> PaymentResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| SubmitGuard(flag))
            .map_err(|_| PaymentError::AttemptInProgress)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single payment screen instance
pub struct PaymentScreen {
    session_id: SessionId,
    urls: MerchantUrls,
    custom_params: CustomParams,
    form: Mutex<FormState>,
    in_flight: AtomicBool,
    requester: BoxedTokenRequester,
    launcher: BoxedPaymentLauncher,
}

impl PaymentScreen {
    /// Create a screen with a fresh session identifier
    pub fn new(
        form: FormState,
        urls: MerchantUrls,
        requester: BoxedTokenRequester,
        launcher: BoxedPaymentLauncher,
    ) -> Self {
        Self {
            session_id: SessionId::generate(),
            urls,
            custom_params: CustomParams::default(),
            form: Mutex::new(form),
            in_flight: AtomicBool::new(false),
            requester,
            launcher,
        }
    }

    /// Builder: replace the custom parameters
    pub fn with_custom_params(mut self, custom_params: CustomParams) -> Self {
        self.custom_params = custom_params;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn merchant_urls(&self) -> &MerchantUrls {
        &self.urls
    }

    /// True while an attempt is running; submit is disabled
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Copy of the current form values
    pub fn form(&self) -> FormState {
        self.lock_form().clone()
    }

    /// Edit form fields in place
    pub fn update_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut FormState),
    {
        edit(&mut self.lock_form());
    }

    fn lock_form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run one payment attempt with the current form values.
    ///
    /// Token fetch failures and all five checkout outcomes come back as an
    /// `AttemptRecord`. Errors are reserved for a rejected double submit and
    /// for a launcher that could not deliver an outcome.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn submit(&self) -> PaymentResult<AttemptRecord> {
        let _guard = SubmitGuard::acquire(&self.in_flight).map_err(|e| {
            warn!("Submit ignored, attempt already in flight");
            e
        })?;

        let submitted_at = Utc::now();
        let (token_url, params) = {
            let form = self.lock_form();
            let params = form.to_token_parameters(&self.session_id, &self.urls, &self.custom_params);
            (form.token_url.clone(), params)
        };
        let merchant_tx_id = params.merchant_tx_id.clone();

        info!(
            "Requesting token: url={}, merchant_tx_id={}, action={}",
            token_url, merchant_tx_id, params.action
        );

        let response = match self.requester.request_token(&token_url, &params).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Token request failed: {}", e);
                let next_order_id = self.lock_form().order_id.clone();
                return Ok(AttemptRecord {
                    merchant_tx_id,
                    result: AttemptResult::TokenFailed,
                    notification: Notification::token_fetch_failed(),
                    next_order_id,
                    submitted_at,
                    completed_at: Utc::now(),
                });
            }
        };

        info!(
            "Launching hosted checkout via {}: merchant_id={}",
            self.launcher.launcher_name(),
            response.merchant_id
        );

        let request = HostedCheckoutRequest::new(response, self.session_id.clone());
        let outcome = match self.launcher.launch(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // A token was already issued for this merchant tx id.
                let next_order_id = self.lock_form().regenerate_order_id().to_string();
                warn!("Hosted checkout failed: {} (next order id={})", e, next_order_id);
                return Err(e);
            }
        };

        Ok(self.interpret(merchant_tx_id, outcome, submitted_at))
    }

    /// Map the outcome to feedback and ready the form for the next attempt
    fn interpret(
        &self,
        merchant_tx_id: String,
        outcome: PaymentOutcome,
        submitted_at: DateTime<Utc>,
    ) -> AttemptRecord {
        let notification = outcome.notification();
        let next_order_id = self.lock_form().regenerate_order_id().to_string();

        info!(
            "Payment outcome: {} (merchant_tx_id={}, next order id={})",
            outcome, merchant_tx_id, next_order_id
        );

        AttemptRecord {
            merchant_tx_id,
            result: AttemptResult::Completed(outcome),
            notification,
            next_order_id,
            submitted_at,
            completed_at: Utc::now(),
        }
    }
}

//! # Payment Outcomes
//!
//! The five terminal outcomes of a hosted checkout and the user feedback
//! each one maps to.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal result reported by the hosted checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentOutcome {
    Successful,
    Canceled,
    Failed,
    Undetermined,
    SessionExpired,
}

impl PaymentOutcome {
    pub const ALL: [PaymentOutcome; 5] = [
        PaymentOutcome::Successful,
        PaymentOutcome::Canceled,
        PaymentOutcome::Failed,
        PaymentOutcome::Undetermined,
        PaymentOutcome::SessionExpired,
    ];

    /// Wire name (`status` query value, prompt input)
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOutcome::Successful => "successful",
            PaymentOutcome::Canceled => "canceled",
            PaymentOutcome::Failed => "failed",
            PaymentOutcome::Undetermined => "undetermined",
            PaymentOutcome::SessionExpired => "session-expired",
        }
    }

    /// Feedback shown to the user for this outcome
    pub fn notification(&self) -> Notification {
        match self {
            PaymentOutcome::Successful => Notification::dialog("Payment successful"),
            PaymentOutcome::Canceled => Notification::toast("Payment cancelled"),
            PaymentOutcome::Failed => Notification::dialog("Payment failed"),
            PaymentOutcome::Undetermined => Notification::toast("Payment result undetermined"),
            PaymentOutcome::SessionExpired => Notification::toast("Session expired"),
        }
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentOutcome {
    type Err = PaymentError;

    /// Accepts wire names plus a few short aliases
    fn from_str(s: &str) -> PaymentResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "successful" | "success" | "s" => Ok(PaymentOutcome::Successful),
            "canceled" | "cancelled" | "cancel" | "c" => Ok(PaymentOutcome::Canceled),
            "failed" | "failure" | "f" => Ok(PaymentOutcome::Failed),
            "undetermined" | "u" => Ok(PaymentOutcome::Undetermined),
            "session-expired" | "session_expired" | "expired" | "e" => {
                Ok(PaymentOutcome::SessionExpired)
            }
            other => Err(PaymentError::UnknownOutcome(other.to_string())),
        }
    }
}

/// How a notification is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    /// Modal, needs acknowledgement
    Dialog,
    /// Transient notice
    Toast,
}

/// User-facing feedback for one attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Notification {
    pub fn dialog(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Dialog,
            message: message.into(),
        }
    }

    pub fn toast(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Toast,
            message: message.into(),
        }
    }

    /// The single generic notice for any token fetch failure
    pub fn token_fetch_failed() -> Self {
        Self::toast("Failed starting payment process")
    }

    pub fn is_dialog(&self) -> bool {
        self.kind == FeedbackKind::Dialog
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

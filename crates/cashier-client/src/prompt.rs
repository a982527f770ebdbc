//! # Prompt Launcher
//!
//! Prints the checkout link and asks for the outcome on the terminal.
//! Useful when the cashier cannot redirect back to this machine.

use crate::links::checkout_link;
use async_trait::async_trait;
use cashier_core::{HostedCheckoutRequest, PaymentError, PaymentLauncher, PaymentOutcome, PaymentResult};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Launcher that reads the outcome from a line-oriented input
pub struct PromptLauncher<R> {
    input: Arc<Mutex<R>>,
}

impl<R> PromptLauncher<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(input: R) -> Self {
        Self::shared(Arc::new(Mutex::new(input)))
    }

    /// Share the input with other readers, e.g. the demo's own prompts
    pub fn shared(input: Arc<Mutex<R>>) -> Self {
        Self { input }
    }
}

fn prompt_text() -> String {
    let choices: Vec<&str> = PaymentOutcome::ALL.iter().map(|o| o.as_str()).collect();
    format!("Payment outcome [{}]: ", choices.join("/"))
}

#[async_trait]
impl<R> PaymentLauncher for PromptLauncher<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    async fn launch(&self, request: HostedCheckoutRequest) -> PaymentResult<PaymentOutcome> {
        let link = checkout_link(&request)?;
        println!("Open the hosted cashier to continue:\n  {}\n", link);

        let mut input = self.input.lock().await;
        let mut line = String::new();
        loop {
            println!("{}", prompt_text());
            line.clear();
            let read = input
                .read_line(&mut line)
                .await
                .map_err(|e| PaymentError::LaunchFailed(format!("Cannot read outcome: {}", e)))?;
            if read == 0 {
                return Err(PaymentError::LaunchFailed(
                    "Input closed before an outcome was entered".to_string(),
                ));
            }

            match line.parse::<PaymentOutcome>() {
                Ok(outcome) => return Ok(outcome),
                Err(e) => {
                    debug!("Ignoring input: {}", e);
                    println!("{}", e);
                }
            }
        }
    }

    fn launcher_name(&self) -> &'static str {
        "prompt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashier_core::{SessionId, TokenResponse};
    use tokio::io::BufReader;

    fn request() -> HostedCheckoutRequest {
        HostedCheckoutRequest::new(
            TokenResponse::new("M1", "https://pay.example/c", "T1"),
            SessionId::generate(),
        )
    }

    #[tokio::test]
    async fn test_reads_outcome() {
        let launcher = PromptLauncher::new(BufReader::new(&b"canceled\n"[..]));
        assert_eq!(launcher.launch(request()).await.unwrap(), PaymentOutcome::Canceled);
    }

    #[tokio::test]
    async fn test_skips_unknown_input() {
        let launcher = PromptLauncher::new(BufReader::new(&b"\nwhat\n  Failed \n"[..]));
        assert_eq!(launcher.launch(request()).await.unwrap(), PaymentOutcome::Failed);
    }

    #[tokio::test]
    async fn test_consecutive_launches_share_input() {
        let launcher = PromptLauncher::new(BufReader::new(&b"s\nsession-expired\n"[..]));
        assert_eq!(launcher.launch(request()).await.unwrap(), PaymentOutcome::Successful);
        assert_eq!(launcher.launch(request()).await.unwrap(), PaymentOutcome::SessionExpired);
    }

    #[tokio::test]
    async fn test_shared_input_leaves_rest_for_others() {
        let input = Arc::new(Mutex::new(BufReader::new(&b"undetermined\ny\n"[..])));
        let launcher = PromptLauncher::shared(input.clone());

        assert_eq!(launcher.launch(request()).await.unwrap(), PaymentOutcome::Undetermined);

        let mut rest = String::new();
        input.lock().await.read_line(&mut rest).await.unwrap();
        assert_eq!(rest, "y\n");
    }

    #[tokio::test]
    async fn test_closed_input_fails() {
        let launcher = PromptLauncher::new(BufReader::new(&b"nope\n"[..]));
        assert!(matches!(
            launcher.launch(request()).await,
            Err(PaymentError::LaunchFailed(_))
        ));
    }
}

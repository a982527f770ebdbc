//! # Loopback Launcher
//!
//! Runs the hosted checkout in the user's browser and captures the single
//! redirect back to the merchant landing page on a loopback listener.
//!
//! Return route:
//! - GET `<landing path>?status=<outcome>[&myriadFlowId=<session id>]`
//!
//! An unknown status or a foreign session id is answered with 400 and the
//! launcher keeps waiting. No redirect within the session TTL means the
//! session expired.

use crate::config::ClientConfig;
use crate::links::checkout_link;
use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use cashier_core::{
    HostedCheckoutRequest, PaymentError, PaymentLauncher, PaymentOutcome, PaymentResult,
    SessionId,
};
use html_escape::encode_text;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, Notify};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

/// How long to wait for in-flight browser connections after the outcome
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Hosted checkout launcher that listens on the landing page address
pub struct LoopbackLauncher {
    listener: std::net::TcpListener,
    return_path: String,
    session_ttl: Duration,
}

impl LoopbackLauncher {
    /// Bind the return listener now so redirects queue up even before launch
    pub fn bind(
        addr: SocketAddr,
        return_path: impl Into<String>,
        session_ttl: Duration,
    ) -> PaymentResult<Self> {
        let listener = std::net::TcpListener::bind(addr).map_err(|e| {
            PaymentError::Configuration(format!("Cannot listen on {}: {}", addr, e))
        })?;

        Ok(Self {
            listener,
            return_path: return_path.into(),
            session_ttl,
        })
    }

    /// Bind at the configured landing page URL
    pub fn from_config(config: &ClientConfig) -> PaymentResult<Self> {
        let (addr, path) = config.landing_endpoint()?;
        Self::bind(addr, path, config.session_ttl)
    }

    pub fn local_addr(&self) -> PaymentResult<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| PaymentError::LaunchFailed(e.to_string()))
    }

    /// URL the hosted cashier should send the customer back to
    pub fn return_url(&self) -> PaymentResult<String> {
        Ok(format!("http://{}{}", self.local_addr()?, self.return_path))
    }

    fn tokio_listener(&self) -> PaymentResult<tokio::net::TcpListener> {
        let std_listener = self
            .listener
            .try_clone()
            .and_then(|l| l.set_nonblocking(true).map(|_| l))
            .map_err(|e| PaymentError::LaunchFailed(format!("Return listener unavailable: {}", e)))?;

        tokio::net::TcpListener::from_std(std_listener)
            .map_err(|e| PaymentError::LaunchFailed(format!("Return listener unavailable: {}", e)))
    }
}

#[async_trait]
impl PaymentLauncher for LoopbackLauncher {
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    async fn launch(&self, request: HostedCheckoutRequest) -> PaymentResult<PaymentOutcome> {
        let link = checkout_link(&request)?;
        let listener = self.tokio_listener()?;

        let (tx, rx) = oneshot::channel();
        let state = ReturnState {
            expected_session: request.session_id.clone(),
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        let app = create_router(&self.return_path, state);

        let shutdown = Arc::new(Notify::new());
        let server_shutdown = shutdown.clone();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { server_shutdown.notified().await })
                .await
        });

        println!("Open the hosted cashier to continue:\n  {}\n", link);
        info!(
            "Waiting up to {}s for the cashier to return to {}",
            self.session_ttl.as_secs(),
            self.return_path
        );

        let result = match tokio::time::timeout(self.session_ttl, rx).await {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(_)) => Err(PaymentError::LaunchFailed(
                "Return listener stopped before an outcome arrived".to_string(),
            )),
            Err(_) => {
                warn!("No return from the hosted cashier, session expired");
                Ok(PaymentOutcome::SessionExpired)
            }
        };

        shutdown.notify_one();
        match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => warn!("Return listener error: {}", e),
            Ok(Err(e)) => warn!("Return listener task failed: {}", e),
            Err(_) => warn!("Return listener did not shut down in time"),
        }

        result
    }

    fn launcher_name(&self) -> &'static str {
        "loopback"
    }
}

// =============================================================================
// Return route
// =============================================================================

#[derive(Clone)]
struct ReturnState {
    expected_session: SessionId,
    sender: Arc<Mutex<Option<oneshot::Sender<PaymentOutcome>>>>,
}

#[derive(Debug, Deserialize)]
struct ReturnQuery {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, rename = "myriadFlowId")]
    myriad_flow_id: Option<String>,
}

fn create_router(return_path: &str, state: ReturnState) -> Router {
    Router::new()
        .route(return_path, get(handle_return))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_return(
    State(state): State<ReturnState>,
    Query(query): Query<ReturnQuery>,
) -> (StatusCode, Html<String>) {
    let outcome = match query.status.as_deref().map(str::parse::<PaymentOutcome>) {
        Some(Ok(outcome)) => outcome,
        Some(Err(e)) => {
            warn!("Rejected cashier return: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                result_page("Unknown payment status", "The return URL carried an unrecognised status."),
            );
        }
        None => {
            return (
                StatusCode::BAD_REQUEST,
                result_page("Missing payment status", "The return URL carried no status."),
            );
        }
    };

    if let Some(flow_id) = &query.myriad_flow_id {
        if flow_id != state.expected_session.as_str() {
            warn!("Rejected cashier return for foreign session {}", flow_id);
            return (
                StatusCode::BAD_REQUEST,
                result_page("Unknown session", "This return does not belong to the running payment."),
            );
        }
    }

    let sender = state
        .sender
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();

    match sender {
        Some(tx) => {
            // Receiver only goes away once the launcher gave up waiting.
            if tx.send(outcome).is_err() {
                warn!("Outcome {} arrived after the launcher stopped waiting", outcome);
            }
            let notification = outcome.notification();
            (
                StatusCode::OK,
                result_page(&notification.message, "You can close this window and return to the terminal."),
            )
        }
        None => (
            StatusCode::CONFLICT,
            result_page("Already reported", "The outcome of this payment was already received."),
        ),
    }
}

fn result_page(title: &str, detail: &str) -> Html<String> {
    Html(format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <h1>{title}</h1>
        <p style="color: #666;">{detail}</p>
    </div>
</body>
</html>
"#,
        title = encode_text(title),
        detail = encode_text(detail)
    ))
}

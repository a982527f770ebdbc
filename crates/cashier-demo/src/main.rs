//! # Hosted Cashier Demo
//!
//! Fill in a payment form, fetch a token from the merchant backend, and
//! finish the payment on the hosted cashier.
//!
//! ## Usage
//!
//! ```bash
//! # Point at the merchant token endpoint
//! export CASHIER_TOKEN_URL=https://merchant.example/api/token
//!
//! # Run with the browser return listener
//! cashier-demo
//!
//! # Or type the outcome in yourself
//! cashier-demo --launcher prompt --currency USD --amount 5.00
//! ```

use cashier_core::Notification;
use cashier_demo::{cli::Cli, state::App, view};
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    println!("{}", view::banner());

    let app = App::new(&cli)?;

    info!("Session: {}", app.screen.session_id());
    info!("Launcher: {:?}", app.launcher);
    info!(
        "Landing page: {}",
        app.screen.merchant_urls().landing_page_url
    );

    loop {
        println!("{}", view::render_form(&app.screen.form()));

        match app.screen.submit().await {
            Ok(record) => println!("{}\n", view::render_attempt(&record)),
            Err(e) => {
                error!("Payment attempt aborted: {}", e);
                let notice = Notification::toast(format!("Payment not started: {}", e));
                println!("{}\n", view::render_notification(&notice));
            }
        }

        if cli.once || !ask_again(&app).await? {
            break;
        }
    }

    Ok(())
}

/// Ask whether to start another payment; anything but yes ends the demo
async fn ask_again(app: &App) -> anyhow::Result<bool> {
    println!("Start another payment? [y/N]");

    let mut line = String::new();
    let read = app.input.lock().await.read_line(&mut line).await?;

    Ok(read > 0 && matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

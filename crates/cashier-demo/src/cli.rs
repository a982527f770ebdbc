//! Command-line arguments for the demo.

use cashier_core::{Action, FormState};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the hosted checkout reports back
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LauncherKind {
    /// Listen for the cashier's redirect to the landing page
    Loopback,
    /// Type the outcome in after finishing in the browser
    Prompt,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Hosted cashier payment demo", long_about = None)]
pub struct Cli {
    /// How to learn the outcome of the hosted checkout
    #[arg(long, value_enum, default_value_t = LauncherKind::Loopback)]
    pub launcher: LauncherKind,

    /// Form defaults file (TOML); defaults to config/form.toml when present
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Stop after a single attempt
    #[arg(long)]
    pub once: bool,

    /// Merchant token endpoint
    #[arg(long)]
    pub token_url: Option<String>,

    #[arg(long)]
    pub customer_id: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub amount: Option<String>,

    /// PURCHASE, AUTH or VERIFY
    #[arg(long)]
    pub action: Option<Action>,

    #[arg(long)]
    pub language: Option<String>,

    /// Order id for the first attempt (later attempts get generated ids)
    #[arg(long)]
    pub order_id: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the form defaults
    pub fn apply_overrides(&self, form: &mut FormState) {
        let text_fields = [
            (&self.token_url, &mut form.token_url),
            (&self.customer_id, &mut form.customer_id),
            (&self.first_name, &mut form.customer_first_name),
            (&self.last_name, &mut form.customer_last_name),
            (&self.email, &mut form.customer_email),
            (&self.phone, &mut form.customer_phone),
            (&self.currency, &mut form.currency),
            (&self.country, &mut form.country),
            (&self.amount, &mut form.amount),
            (&self.language, &mut form.language),
            (&self.order_id, &mut form.order_id),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }

        if let Some(action) = self.action {
            form.select_action(action);
        }
    }
}

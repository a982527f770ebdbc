//! # Application State
//!
//! Wires configuration, form defaults, and the chosen launcher into a
//! payment screen.

use crate::cli::{Cli, LauncherKind};
use cashier_client::{ClientConfig, HttpTokenRequester, LoopbackLauncher, PromptLauncher};
use cashier_core::{BoxedPaymentLauncher, FormDefaults, FormState, MerchantUrls, PaymentScreen};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{BufReader, Stdin};
use tokio::sync::Mutex;

/// Terminal input shared by the prompt launcher and the demo's own prompts
pub type SharedInput = Arc<Mutex<BufReader<Stdin>>>;

/// Everything the demo loop needs
pub struct App {
    pub screen: PaymentScreen,
    pub input: SharedInput,
    pub launcher: LauncherKind,
}

impl App {
    /// Build the app from parsed arguments and the environment
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        let defaults = load_form_defaults(cli.defaults.as_deref(), &config)?;

        let mut form = FormState::from_defaults(&defaults);
        cli.apply_overrides(&mut form);

        let input: SharedInput = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin())));
        let (launcher, urls): (BoxedPaymentLauncher, MerchantUrls) = match cli.launcher {
            LauncherKind::Loopback => {
                let loopback = LoopbackLauncher::from_config(&config)?;
                // The cashier must return to wherever the listener actually bound.
                let urls = MerchantUrls::new(loopback.return_url()?, &config.notification_url);
                (Arc::new(loopback), urls)
            }
            LauncherKind::Prompt => (
                Arc::new(PromptLauncher::shared(input.clone())),
                config.merchant_urls(),
            ),
        };

        let requester = Arc::new(HttpTokenRequester::from_config(&config)?);
        let screen = PaymentScreen::new(form, urls, requester, launcher);

        Ok(Self {
            screen,
            input,
            launcher: cli.launcher,
        })
    }
}

/// Load form defaults.
///
/// An explicit path must exist. Otherwise `config/form.toml` is tried in the
/// usual locations and the built-in defaults are used when none is found.
/// The token URL from the environment applies unless the file sets one.
pub fn load_form_defaults(
    explicit: Option<&Path>,
    config: &ClientConfig,
) -> anyhow::Result<FormDefaults> {
    let env_defaults = FormDefaults {
        token_url: config.token_url.clone(),
        ..FormDefaults::default()
    };

    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => ["config/form.toml", "../config/form.toml", "../../config/form.toml"]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
    };

    for path in &candidates {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let defaults = FormDefaults::from_toml_over(&env_defaults, &content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
                tracing::info!("Loaded form defaults from {}", path.display());
                return Ok(defaults);
            }
            Err(e) if explicit.is_some() => {
                return Err(anyhow::anyhow!("Cannot read {}: {}", path.display(), e));
            }
            Err(_) => continue,
        }
    }

    tracing::debug!("No form defaults file found, using built-in defaults");
    Ok(env_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config() -> ClientConfig {
        ClientConfig::default().with_token_url("https://env.example/token")
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing-here.toml");

        assert!(load_form_defaults(Some(&missing), &config()).is_err());
    }

    #[test]
    fn test_file_overrides_and_env_token_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency = \"CHF\"").unwrap();

        let defaults = load_form_defaults(Some(file.path()), &config()).unwrap();

        assert_eq!(defaults.currency, "CHF");
        assert_eq!(defaults.token_url, "https://env.example/token");
        assert_eq!(defaults.language, FormDefaults::default().language);
    }

    #[test]
    fn test_file_token_url_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token_url = \"https://file.example/token\"").unwrap();

        let defaults = load_form_defaults(Some(file.path()), &config()).unwrap();

        assert_eq!(defaults.token_url, "https://file.example/token");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency = [").unwrap();

        assert!(load_form_defaults(Some(file.path()), &config()).is_err());
    }
}

//! # Payment Form
//!
//! Field values for one payment screen, seeded with demo defaults.
//! Defaults can be loaded from `config/form.toml`.

use crate::error::{PaymentError, PaymentResult};
use crate::ids::{MerchantTxId, SessionId};
use crate::token::{CustomParams, TokenRequestParameters};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment action, picked from a fixed list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    #[default]
    Purchase,
    Auth,
    Verify,
}

impl Action {
    /// Every selectable action, in display order
    pub const ALL: [Action; 3] = [Action::Purchase, Action::Auth, Action::Verify];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Purchase => "PURCHASE",
            Action::Auth => "AUTH",
            Action::Verify => "VERIFY",
        }
    }

    /// VERIFY checks the card only and never carries an amount
    pub fn carries_amount(&self) -> bool {
        !matches!(self, Action::Verify)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PaymentError;

    fn from_str(s: &str) -> PaymentResult<Self> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaymentError::UnknownAction(s.to_string()))
    }
}

/// Merchant callback URLs sent with every token request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantUrls {
    pub landing_page_url: String,
    pub notification_url: String,
}

impl MerchantUrls {
    pub fn new(landing_page_url: impl Into<String>, notification_url: impl Into<String>) -> Self {
        Self {
            landing_page_url: landing_page_url.into(),
            notification_url: notification_url.into(),
        }
    }
}

/// Demo default values for every field.
///
/// These are demo constants, not business rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub customer_id: String,
    pub currency: String,
    pub country: String,
    pub amount: String,
    pub action: Action,
    pub language: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_address_street: String,
    pub customer_address_house_name: String,
    pub customer_address_city: String,
    pub customer_address_postal_code: String,
    pub customer_address_country: String,
    pub customer_address_state: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub token_url: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            customer_id: "demo-customer".to_string(),
            currency: "EUR".to_string(),
            country: "PL".to_string(),
            amount: "10.00".to_string(),
            action: Action::Purchase,
            language: "en".to_string(),
            customer_first_name: "Jan".to_string(),
            customer_last_name: "Kowalski".to_string(),
            customer_address_street: "Marszalkowska".to_string(),
            customer_address_house_name: "10".to_string(),
            customer_address_city: "Warsaw".to_string(),
            customer_address_postal_code: "00-001".to_string(),
            customer_address_country: "PL".to_string(),
            customer_address_state: "Mazowieckie".to_string(),
            customer_phone: "+48123456789".to_string(),
            customer_email: "jan.kowalski@example.com".to_string(),
            token_url: "http://localhost:8080/api/v1/token".to_string(),
        }
    }
}

impl FormDefaults {
    /// Parse defaults from TOML; missing keys keep the built-in values
    pub fn from_toml(content: &str) -> PaymentResult<Self> {
        Self::from_toml_over(&Self::default(), content)
    }

    /// Parse defaults from TOML; missing keys keep the values of `base`
    pub fn from_toml_over(base: &Self, content: &str) -> PaymentResult<Self> {
        let overrides: toml::Table = content.parse().map_err(invalid_defaults)?;

        let mut merged = toml::Value::try_from(base).map_err(invalid_defaults)?;
        if let toml::Value::Table(table) = &mut merged {
            for (key, value) in overrides {
                table.insert(key, value);
            }
        }

        merged.try_into().map_err(invalid_defaults)
    }
}

fn invalid_defaults(e: impl fmt::Display) -> PaymentError {
    PaymentError::Configuration(format!("Invalid form defaults: {}", e))
}

/// Current values of the payment form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub customer_id: String,
    pub currency: String,
    pub country: String,
    pub amount: String,
    action: Action,
    /// Amount in place before VERIFY zeroed it
    amount_before_verify: Option<String>,
    pub language: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_address_street: String,
    pub customer_address_house_name: String,
    pub customer_address_city: String,
    pub customer_address_postal_code: String,
    pub customer_address_country: String,
    pub customer_address_state: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub order_id: String,
    pub token_url: String,
}

impl FormState {
    /// Populate every field from defaults and generate a fresh order id
    pub fn from_defaults(defaults: &FormDefaults) -> Self {
        let d = defaults.clone();
        let mut form = Self {
            customer_id: d.customer_id,
            currency: d.currency,
            country: d.country,
            amount: d.amount,
            action: Action::Purchase,
            amount_before_verify: None,
            language: d.language,
            customer_first_name: d.customer_first_name,
            customer_last_name: d.customer_last_name,
            customer_address_street: d.customer_address_street,
            customer_address_house_name: d.customer_address_house_name,
            customer_address_city: d.customer_address_city,
            customer_address_postal_code: d.customer_address_postal_code,
            customer_address_country: d.customer_address_country,
            customer_address_state: d.customer_address_state,
            customer_phone: d.customer_phone,
            customer_email: d.customer_email,
            order_id: MerchantTxId::generate().into_string(),
            token_url: d.token_url,
        };
        form.select_action(d.action);
        form
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Select an action, zeroing the amount for VERIFY and restoring it after
    pub fn select_action(&mut self, action: Action) {
        match (self.action.carries_amount(), action.carries_amount()) {
            (true, false) => {
                self.amount_before_verify = Some(std::mem::replace(&mut self.amount, "0".to_string()));
            }
            (false, true) => {
                if let Some(previous) = self.amount_before_verify.take() {
                    self.amount = previous;
                }
            }
            _ => {}
        }
        self.action = action;
    }

    /// Replace the order id with a new one, different from the current
    pub fn regenerate_order_id(&mut self) -> &str {
        self.order_id = MerchantTxId::regenerate(&self.order_id).into_string();
        &self.order_id
    }

    /// Build the token request from the current values, verbatim
    pub fn to_token_parameters(
        &self,
        session_id: &SessionId,
        urls: &MerchantUrls,
        custom_params: &CustomParams,
    ) -> TokenRequestParameters {
        TokenRequestParameters {
            customer_id: self.customer_id.clone(),
            currency: self.currency.clone(),
            country: self.country.clone(),
            amount: self.amount.clone(),
            action: self.action.as_str().to_string(),
            language: self.language.clone(),
            merchant_landing_page_url: urls.landing_page_url.clone(),
            merchant_notification_url: urls.notification_url.clone(),
            myriad_flow_id: session_id.clone(),
            merchant_tx_id: self.order_id.clone(),
            customer_first_name: self.customer_first_name.clone(),
            customer_last_name: self.customer_last_name.clone(),
            customer_address_street: self.customer_address_street.clone(),
            customer_address_house_name: self.customer_address_house_name.clone(),
            customer_address_city: self.customer_address_city.clone(),
            customer_address_postal_code: self.customer_address_postal_code.clone(),
            customer_address_country: self.customer_address_country.clone(),
            customer_address_state: self.customer_address_state.clone(),
            customer_phone: self.customer_phone.clone(),
            customer_email: self.customer_email.clone(),
            custom_params: custom_params.clone(),
        }
    }

    /// Label/value pairs in display order
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Customer ID", self.customer_id.as_str()),
            ("First name", self.customer_first_name.as_str()),
            ("Last name", self.customer_last_name.as_str()),
            ("Street", self.customer_address_street.as_str()),
            ("House", self.customer_address_house_name.as_str()),
            ("City", self.customer_address_city.as_str()),
            ("Postal code", self.customer_address_postal_code.as_str()),
            ("Address country", self.customer_address_country.as_str()),
            ("State", self.customer_address_state.as_str()),
            ("Phone", self.customer_phone.as_str()),
            ("Email", self.customer_email.as_str()),
            ("Currency", self.currency.as_str()),
            ("Country", self.country.as_str()),
            ("Amount", self.amount.as_str()),
            ("Action", self.action.as_str()),
            ("Language", self.language.as_str()),
            ("Order ID", self.order_id.as_str()),
            ("Token URL", self.token_url.as_str()),
        ]
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_defaults(&FormDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> MerchantUrls {
        MerchantUrls::new("https://m.example/landing", "https://m.example/notify")
    }

    #[test]
    fn test_defaults_populate_every_field() {
        let form = FormState::default();

        assert_eq!(form.currency, "EUR");
        assert_eq!(form.action(), Action::Purchase);
        assert!(MerchantTxId::is_well_formed(&form.order_id));
        assert!(form.fields().iter().all(|(_, value)| !value.is_empty()));
    }

    #[test]
    fn test_token_parameters_are_verbatim() {
        let mut form = FormState::default();
        form.customer_email = String::new();
        form.amount = "not-a-number".to_string();
        let session = SessionId::generate();

        let params = form.to_token_parameters(&session, &urls(), &CustomParams::default());

        assert_eq!(params.customer_email, "");
        assert_eq!(params.amount, "not-a-number");
        assert_eq!(params.merchant_tx_id, form.order_id);
        assert_eq!(params.myriad_flow_id, session);
        assert_eq!(params.merchant_landing_page_url, "https://m.example/landing");
        assert_eq!(params.action, "PURCHASE");
    }

    #[test]
    fn test_token_parameters_wire_shape() {
        let form = FormState::default();
        let params = form.to_token_parameters(&SessionId::generate(), &urls(), &CustomParams::default());
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["merchantTxId"], form.order_id.as_str());
        assert_eq!(json["customerAddressPostalCode"], "00-001");
        assert_eq!(json["merchantNotificationUrl"], "https://m.example/notify");
        assert!(json["myriadFlowId"].is_string());
        assert_eq!(json["customParams"]["customParameter2"], "Custom Param Value 2");
    }

    #[test]
    fn test_verify_zeroes_and_restores_amount() {
        let mut form = FormState::default();
        form.amount = "42.50".to_string();

        form.select_action(Action::Verify);
        assert_eq!(form.amount, "0");

        form.select_action(Action::Auth);
        assert_eq!(form.amount, "42.50");
        assert_eq!(form.action(), Action::Auth);
    }

    #[test]
    fn test_regenerate_order_id() {
        let mut form = FormState::default();
        let before = form.order_id.clone();

        let after = form.regenerate_order_id().to_string();

        assert_ne!(before, after);
        assert!(MerchantTxId::is_well_formed(&after));
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("verify".parse::<Action>().unwrap(), Action::Verify);
        assert_eq!(" AUTH ".parse::<Action>().unwrap(), Action::Auth);
        assert!("REFUND".parse::<Action>().is_err());
    }

    #[test]
    fn test_default_action_is_purchase() {
        assert_eq!(Action::default(), Action::Purchase);
        assert_eq!(FormState::default().action(), Action::Purchase);
    }

    #[test]
    fn test_defaults_from_toml() {
        let defaults = FormDefaults::from_toml(
            r#"
            currency = "GBP"
            action = "VERIFY"
            "#,
        )
        .unwrap();

        assert_eq!(defaults.currency, "GBP");
        assert_eq!(defaults.customer_address_city, "Warsaw");

        let form = FormState::from_defaults(&defaults);
        assert_eq!(form.action(), Action::Verify);
        assert_eq!(form.amount, "0");
    }

    #[test]
    fn test_defaults_over_base() {
        let base = FormDefaults {
            token_url: "https://env.example/token".to_string(),
            ..FormDefaults::default()
        };

        let kept = FormDefaults::from_toml_over(&base, "language = \"de\"").unwrap();
        assert_eq!(kept.token_url, "https://env.example/token");
        assert_eq!(kept.language, "de");

        let replaced =
            FormDefaults::from_toml_over(&base, "token_url = \"https://file.example/t\"").unwrap();
        assert_eq!(replaced.token_url, "https://file.example/t");
    }

    #[test]
    fn test_defaults_from_bad_toml() {
        assert!(matches!(
            FormDefaults::from_toml("currency = ["),
            Err(PaymentError::Configuration(_))
        ));
    }
}

//! Run configuration, built once at startup and passed down explicitly

use crate::collector::ScreeningThresholds;
use crate::error::{PickError, Result};
use crate::prompts::Language;
use pick_utils::lookup_required;
use std::fmt;

/// Environment variable holding the Anthropic API key
pub const API_KEY_VAR: &str = "CLAUDE_API_KEY";
/// Environment variable holding the mail account (sender and recipient)
pub const EMAIL_VAR: &str = "EMAIL";
/// Environment variable holding the mail account password
pub const EMAIL_PASSWORD_VAR: &str = "EMAIL_PASSWORD";

/// Model asked for the pick
pub const DEFAULT_MODEL: &str = "claude-opus-4-6";
/// Output budget for the pick
pub const DEFAULT_MAX_TOKENS: usize = 1500;
/// Mail relay host
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// Implicit TLS submission port
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// The fixed ticker universe screened every run
pub const DEFAULT_TICKERS: [&str; 15] = [
    "AAPL", "MSFT", "GOOGL", "META", "AMZN", "NVDA", "AMD", "TSLA", "NFLX", "CRM", "ADBE", "INTC",
    "QCOM", "TXN", "AVGO",
];

/// Configuration for one pick run
#[derive(Clone)]
pub struct PickerConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Mail account, used as both sender and recipient
    pub mail_account: String,

    /// Mail account password
    pub mail_password: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens the model may generate
    pub max_tokens: usize,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port (implicit TLS)
    pub smtp_port: u16,

    /// Language for prompt, console output and mail subject
    pub language: Language,

    /// Symbols screened, in report order
    pub tickers: Vec<String>,

    /// Screening thresholds
    pub thresholds: ScreeningThresholds,
}

impl PickerConfig {
    /// Create a new configuration builder
    pub fn builder() -> PickerConfigBuilder {
        PickerConfigBuilder::default()
    }

    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::builder()
            .api_key(lookup_required(API_KEY_VAR, &lookup)?)
            .mail_account(lookup_required(EMAIL_VAR, &lookup)?)
            .mail_password(lookup_required(EMAIL_PASSWORD_VAR, &lookup)?)
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(PickError::Config("model must not be empty".to_string()));
        }

        if self.max_tokens == 0 {
            return Err(PickError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if !self.mail_account.contains('@') {
            return Err(PickError::Config(format!(
                "{EMAIL_VAR} is not an email address: {}",
                self.mail_account
            )));
        }

        if self.tickers.is_empty() {
            return Err(PickError::Config("ticker list is empty".to_string()));
        }

        Ok(())
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("api_key", &"<redacted>")
            .field("mail_account", &self.mail_account)
            .field("mail_password", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("language", &self.language)
            .field("tickers", &self.tickers)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

/// Builder for PickerConfig
#[derive(Debug, Default)]
pub struct PickerConfigBuilder {
    api_key: Option<String>,
    mail_account: Option<String>,
    mail_password: Option<String>,
    model: Option<String>,
    max_tokens: Option<usize>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    language: Option<Language>,
    tickers: Option<Vec<String>>,
    thresholds: Option<ScreeningThresholds>,
}

impl PickerConfigBuilder {
    /// Set the Anthropic API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the mail account
    pub fn mail_account(mut self, account: impl Into<String>) -> Self {
        self.mail_account = Some(account.into());
        self
    }

    /// Set the mail password
    pub fn mail_password(mut self, password: impl Into<String>) -> Self {
        self.mail_password = Some(password.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the output token budget
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the SMTP relay
    pub fn smtp_relay(mut self, host: impl Into<String>, port: u16) -> Self {
        self.smtp_host = Some(host.into());
        self.smtp_port = Some(port);
        self
    }

    /// Set the output language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Replace the screened tickers
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = Some(tickers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the screening thresholds
    pub fn thresholds(mut self, thresholds: ScreeningThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PickerConfig> {
        let missing = |what: &str| PickError::Config(format!("{what} is required"));

        let config = PickerConfig {
            api_key: self.api_key.ok_or_else(|| missing("api key"))?,
            mail_account: self.mail_account.ok_or_else(|| missing("mail account"))?,
            mail_password: self.mail_password.ok_or_else(|| missing("mail password"))?,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            smtp_host: self
                .smtp_host
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
            language: self.language.unwrap_or_default(),
            tickers: self
                .tickers
                .unwrap_or_else(|| DEFAULT_TICKERS.iter().map(ToString::to_string).collect()),
            thresholds: self.thresholds.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pick_utils::EnvError;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (API_KEY_VAR, "sk-ant-test"),
            (EMAIL_VAR, "me@example.com"),
            (EMAIL_PASSWORD_VAR, "app-password"),
        ])
    }

    #[test]
    fn test_from_lookup_defaults() {
        let env = full_env();
        let config = PickerConfig::from_lookup(|k| env.get(k).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.api_key, "sk-ant-test");
        assert_eq!(config.mail_account, "me@example.com");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 1500);
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 465);
        assert_eq!(config.language, Language::Korean);
        assert_eq!(config.tickers.len(), 15);
        assert_eq!(config.tickers[0], "AAPL");
        assert_eq!(config.tickers[14], "AVGO");
    }

    #[test]
    fn test_from_lookup_missing_password() {
        let mut env = full_env();
        env.remove(EMAIL_PASSWORD_VAR);
        let err = PickerConfig::from_lookup(|k| env.get(k).map(|v| (*v).to_string())).unwrap_err();

        assert!(matches!(
            err,
            PickError::Env(EnvError::Missing(ref name)) if name == EMAIL_PASSWORD_VAR
        ));
    }

    #[test]
    fn test_invalid_mail_account() {
        let result = PickerConfig::builder()
            .api_key("k")
            .mail_account("not-an-address")
            .mail_password("p")
            .build();
        assert!(matches!(result, Err(PickError::Config(_))));
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let result = PickerConfig::builder()
            .api_key("k")
            .mail_account("me@example.com")
            .mail_password("p")
            .max_tokens(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = PickerConfig::builder()
            .api_key("sk-ant-secret")
            .mail_account("me@example.com")
            .mail_password("hunter2")
            .build()
            .unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("sk-ant-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("me@example.com"));
    }
}

//! Runtime configuration: forms host, timeouts, pacing, and placeholder answers.

use std::time::Duration;

/// Host that serves form pages and receives submissions.
pub const DEFAULT_FORMS_BASE: &str = "https://docs.google.com";

/// Browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.114 Safari/537.36";

pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_DELAY_MS: u64 = 1_000;

pub const DEFAULT_EMAIL: &str = "your_email@gmail.com";
pub const DEFAULT_TEXT_ANSWER: &str = "Ok!";
pub const DEFAULT_SHORT_ANSWER_OVERRIDE: &str = "Random answer!";

/// Settings shared by the fetcher, the fill strategies, and the campaign loop.
#[derive(Debug, Clone)]
pub struct FillerConfig {
    /// Scheme and host used to rebuild submission endpoints and the `Origin` header.
    pub forms_base: String,
    pub timeout_ms: u64,
    /// Pause between consecutive attempts of a campaign.
    pub delay_ms: u64,
    pub user_agent: String,
    /// Answer for the synthesized email field.
    pub email: String,
    /// Answer for required text questions.
    pub text_answer: String,
    /// Answer for questions labelled exactly "Short answer".
    pub short_answer_override: String,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            forms_base: DEFAULT_FORMS_BASE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            delay_ms: DEFAULT_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            text_answer: DEFAULT_TEXT_ANSWER.to_string(),
            short_answer_override: DEFAULT_SHORT_ANSWER_OVERRIDE.to_string(),
        }
    }
}

impl FillerConfig {
    /// Defaults overlaid with `GFORM_*` environment variables.
    ///
    /// Unparseable numeric values are ignored and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("GFORM_BASE_URL") {
            config.forms_base = base.trim_end_matches('/').to_string();
        }
        if let Some(ms) = lookup("GFORM_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            config.timeout_ms = ms;
        }
        if let Some(ms) = lookup("GFORM_DELAY_MS").and_then(|v| v.parse().ok()) {
            config.delay_ms = ms;
        }
        if let Some(email) = lookup("GFORM_EMAIL") {
            config.email = email;
        }

        config
    }

    pub fn with_forms_base(mut self, base: impl Into<String>) -> Self {
        self.forms_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = FillerConfig::default();
        assert_eq!(config.forms_base, "https://docs.google.com");
        assert_eq!(config.timeout(), Duration::from_secs(8));
        assert_eq!(config.delay(), Duration::from_secs(1));
        assert!(config.user_agent.contains("Chrome"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GFORM_BASE_URL", "http://127.0.0.1:9000/"),
            ("GFORM_TIMEOUT_MS", "500"),
            ("GFORM_DELAY_MS", "not-a-number"),
            ("GFORM_EMAIL", "me@example.com"),
        ]
        .into_iter()
        .collect();
        let config = FillerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.forms_base, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.delay_ms, DEFAULT_DELAY_MS);
        assert_eq!(config.email, "me@example.com");
    }

    #[test]
    fn test_builder_trims_base() {
        let config = FillerConfig::default().with_forms_base("http://localhost:1234/");
        assert_eq!(config.forms_base, "http://localhost:1234");
    }
}

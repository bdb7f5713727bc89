//! Environment configuration. All settings are required; the process
//! refuses to start without them.

use std::env;

/// Configuration error, fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or blank
    #[error("missing or empty required environment variable: {0}")]
    Missing(&'static str),
}

/// Runtime configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the page that lists the available time slots for a given
    /// appointment type
    pub booking_url: String,

    /// Session cookie required by the booking page
    pub booking_cookie: String,

    /// Token for the Telegram bot
    pub telegram_token: String,
}

impl Config {
    /// Load the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            booking_url: require("BORGERSERVICE_URL")?,
            booking_cookie: require("BORGERSERVICE_COOKIE")?,
            telegram_token: require("BORGERSERVICE_TELEGRAM_TOKEN")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_variable_counts_as_missing() {
        // SAFETY: tests in this module are the only ones touching this
        // variable.
        unsafe { env::set_var("BORGERSERVICE_TEST_BLANK", "") };
        assert!(matches!(
            require("BORGERSERVICE_TEST_BLANK"),
            Err(ConfigError::Missing("BORGERSERVICE_TEST_BLANK"))
        ));
    }

    #[test]
    fn set_variable_is_returned() {
        unsafe { env::set_var("BORGERSERVICE_TEST_SET", "value") };
        assert_eq!(require("BORGERSERVICE_TEST_SET").unwrap(), "value");
    }
}

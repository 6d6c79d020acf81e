//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway selection
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway implementation; only `mock` ships with the service
    #[serde(default = "default_provider")]
    pub provider: String,

    /// ISO currency code charged for sessions
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Makes the mock gateway decline every authorization
    #[serde(default)]
    pub mock_decline_all: bool,

    /// Simulated gateway latency for the mock, in milliseconds
    #[serde(default)]
    pub mock_latency_ms: u64,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider != "mock" {
            return Err(ValidationError::UnsupportedPaymentProvider(self.provider.clone()));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            currency: default_currency(),
            mock_decline_all: false,
            mock_latency_ms: 0,
        }
    }
}

fn default_provider() -> String {
    "mock".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PaymentConfig::default();
        assert_eq!(config.currency, "INR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = PaymentConfig {
            provider: "stripe".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnsupportedPaymentProvider(_))
        ));
    }

    #[test]
    fn test_currency_must_be_iso_code() {
        for bad in ["inr", "RUPEE", "", "U$D"] {
            let config = PaymentConfig {
                currency: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidCurrency));
        }
    }
}

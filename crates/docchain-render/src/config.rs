use serde::{Deserialize, Serialize};

/// Rendering options shared by every timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Currency code printed in front of amounts.
    pub currency: String,
    /// Whether entries show the running balance next to the amount.
    pub show_running_balance: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            currency: "AED".into(),
            show_running_balance: true,
        }
    }
}

impl RenderConfig {
    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = RenderConfig::default();
        assert_eq!(c.currency, "AED");
        assert!(c.show_running_balance);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let c: RenderConfig = serde_json::from_str(r#"{"currency":"USD"}"#).unwrap();
        assert_eq!(c.currency, "USD");
        assert!(c.show_running_balance);
    }
}

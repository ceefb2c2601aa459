//! Runtime knobs for the dashboard.
//!
//! Every field has a default, so an override document only needs to name the
//! values it changes:
//!
//! ```json
//! { "submit_delay_ms": 500 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows kept by the contact list preview, header included.
    pub preview_rows: usize,
    /// Simulated latency of the campaign submission service.
    pub submit_delay_ms: u32,
    /// How long the success banner stays up before the wizard resets.
    pub reset_delay_ms: u32,
    pub toast_duration_ms: u32,
    /// Local storage key holding the signed-in user.
    pub session_key: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            submit_delay_ms: 2000,
            reset_delay_ms: 3000,
            toast_duration_ms: 3000,
            session_key: "user".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(raw)?;
        if config.preview_rows == 0 {
            return Err(ConfigError::Invalid("preview_rows must be at least 1".into()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = DashboardConfig::from_json(r#"{ "submit_delay_ms": 10 }"#).unwrap();
        assert_eq!(config.submit_delay_ms, 10);
        assert_eq!(config.reset_delay_ms, 3000);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            DashboardConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_preview_rows_is_rejected() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "preview_rows": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}

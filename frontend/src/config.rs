use common::config::DashboardConfig;
use log::warn;

/// Local storage key of the optional JSON override.
const CONFIG_KEY: &str = "dashboard_config";

/// Reads the dashboard settings, falling back to defaults when no override is
/// stored or the stored one is invalid.
pub fn load() -> DashboardConfig {
    let raw = crate::services::local_storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten());

    match raw {
        Some(raw) => DashboardConfig::from_json(&raw).unwrap_or_else(|err| {
            warn!("ignoring {CONFIG_KEY}: {err}");
            DashboardConfig::default()
        }),
        None => DashboardConfig::default(),
    }
}

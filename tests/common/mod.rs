//! Shared fixtures for the integration suites.

use bookcheck::config::Settings;
use bookcheck::http::ApiClient;

/// Host of the public demo target, which accepts writes but never persists
/// them. Post-write verification is skipped against it.
pub const SANDBOX_HOST: &str = "fakerestapi.azurewebsites.net";

/// Settings pointing at a local mock server instead of the demo endpoint.
pub fn settings_for(server_url: &str) -> Settings {
    Settings {
        base_url: server_url.to_string(),
        deletion_persistence: true,
        log_level: "debug".to_string(),
        ..Settings::default()
    }
}

/// Per-suite setup: logging plus a freshly initialized client core.
pub fn client_for(settings: &Settings) -> ApiClient {
    bookcheck::logger::init(settings);
    ApiClient::new(settings).expect("client core must initialize against a configured target")
}

/// Whether a post-write read should be strictly verified for this target.
pub fn expect_persistence(settings: &Settings) -> bool {
    settings.deletion_persistence && !settings.base_url.contains(SANDBOX_HOST)
}

//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::provider::{ApnsEnvironment, Provider};

/// Default location of the APNs VoIP certificate
pub const DEFAULT_APNS_CERTIFICATE: &str = "./callkeep-apns.p12";

/// Default location of the Firebase service account
pub const DEFAULT_FCM_CREDENTIALS: &str = "./callkeep-fcm.json";

/// Default tracing filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: Option<String>,
    pub apns_certificate: Option<String>,
    pub apns_certificate_password: Option<String>,
    pub apns_environment: Option<String>,
    pub apns_topic: Option<String>,
    pub fcm_credentials: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            provider: Some(Provider::default().to_string()),
            apns_certificate: Some(DEFAULT_APNS_CERTIFICATE.to_string()),
            apns_certificate_password: None,
            apns_environment: Some(ApnsEnvironment::default().to_string()),
            apns_topic: None,
            fcm_credentials: Some(DEFAULT_FCM_CREDENTIALS.to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: other.provider.or(self.provider),
            apns_certificate: other.apns_certificate.or(self.apns_certificate),
            apns_certificate_password: other
                .apns_certificate_password
                .or(self.apns_certificate_password),
            apns_environment: other.apns_environment.or(self.apns_environment),
            apns_topic: other.apns_topic.or(self.apns_topic),
            fcm_credentials: other.fcm_credentials.or(self.fcm_credentials),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Provider name as configured; parsing is left to the dispatcher so
    /// unknown names surface as its error.
    pub fn provider_or_default(&self) -> &str {
        self.provider
            .as_deref()
            .unwrap_or_else(|| Provider::default().as_str())
    }

    pub fn apns_certificate_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.apns_certificate
                .as_deref()
                .unwrap_or(DEFAULT_APNS_CERTIFICATE),
        )
    }

    /// Certificate password, empty if not set
    pub fn apns_certificate_password_or_default(&self) -> &str {
        self.apns_certificate_password.as_deref().unwrap_or("")
    }

    /// Get APNs environment as parsed value, or development if not set/invalid
    pub fn apns_environment_or_default(&self) -> ApnsEnvironment {
        self.apns_environment
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn fcm_credentials_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.fcm_credentials
                .as_deref()
                .unwrap_or(DEFAULT_FCM_CREDENTIALS),
        )
    }

    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

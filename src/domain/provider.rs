//! Push provider and APNs environment value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{InvalidApnsEnvironmentError, ProviderNotFound};

/// All supported providers
pub const ALL_PROVIDERS: &[Provider] = &[Provider::Apns, Provider::Fcm];

/// Push delivery services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    /// Apple Push Notification service (PushKit VoIP)
    Apns,
    /// Firebase Cloud Messaging
    #[default]
    Fcm,
}

impl Provider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Apns => "apns",
            Self::Fcm => "fcm",
        }
    }
}

impl FromStr for Provider {
    type Err = ProviderNotFound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apns" => Ok(Self::Apns),
            "fcm" => Ok(Self::Fcm),
            _ => Err(ProviderNotFound {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const APNS_DEVELOPMENT_URL: &str = "https://api.sandbox.push.apple.com";
const APNS_PRODUCTION_URL: &str = "https://api.push.apple.com";

/// APNs gateway selection.
///
/// Development builds (installed from Xcode) only receive pushes through the
/// sandbox gateway; App Store and ad-hoc builds need production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApnsEnvironment {
    #[default]
    Development,
    Production,
}

impl ApnsEnvironment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Base URL of the gateway for this environment
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Development => APNS_DEVELOPMENT_URL,
            Self::Production => APNS_PRODUCTION_URL,
        }
    }
}

impl FromStr for ApnsEnvironment {
    type Err = InvalidApnsEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "sandbox" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            _ => Err(InvalidApnsEnvironmentError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ApnsEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

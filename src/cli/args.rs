//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::AppConfig;
use crate::domain::provider::ApnsEnvironment;

/// CallKeep push tester - send one incoming-call push to a device
#[derive(Parser, Debug)]
#[command(name = "callkeep-push")]
#[command(version)]
#[command(about = "Send a CallKeep incoming-call push through FCM or APNs (PushKit VoIP)")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Push provider type: fcm | apns [default: fcm]
    #[arg(short = 'p', long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Device token
    #[arg(short = 'd', long = "device-token", value_name = "TOKEN")]
    pub device_token: Option<String>,

    /// Caller id
    #[arg(short = 'i', long = "caller-id", value_name = "ID")]
    pub caller_id: Option<String>,

    /// APNs gateway to push through
    #[arg(long, value_name = "ENV")]
    pub apns_env: Option<ApnsEnvArg>,

    /// Log at debug level
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Device token and caller id, if both were given and non-empty
    pub fn push_target(&self) -> Option<(&str, &str)> {
        let token = self.device_token.as_deref().filter(|s| !s.is_empty())?;
        let caller_id = self.caller_id.as_deref().filter(|s| !s.is_empty())?;
        Some((token, caller_id))
    }

    /// The config layer contributed by command-line flags
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            provider: self.provider.clone(),
            apns_environment: self
                .apns_env
                .map(|env| ApnsEnvironment::from(env).to_string()),
            log_level: if self.verbose {
                Some("debug".to_string())
            } else {
                None
            },
            ..Default::default()
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// APNs environment argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ApnsEnvArg {
    Development,
    Production,
}

impl From<ApnsEnvArg> for ApnsEnvironment {
    fn from(arg: ApnsEnvArg) -> Self {
        match arg {
            ApnsEnvArg::Development => ApnsEnvironment::Development,
            ApnsEnvArg::Production => ApnsEnvironment::Production,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider",
    "apns_certificate",
    "apns_certificate_password",
    "apns_environment",
    "apns_topic",
    "fcm_credentials",
    "log_level",
];

/// Valid log levels
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

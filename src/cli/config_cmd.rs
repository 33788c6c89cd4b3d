//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::provider::{ApnsEnvironment, Provider};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS, VALID_LOG_LEVELS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    *field_mut(&mut config, key) = Some(value.to_string());
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, display_value(key, value)));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    match field_mut(&mut config, key).as_deref() {
        Some(v) => presenter.output(&display_value(key, v)),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let mut config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = field_mut(&mut config, key)
            .as_deref()
            .map(|v| display_value(key, v))
            .unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// The config field behind a validated key
fn field_mut<'a>(config: &'a mut AppConfig, key: &str) -> &'a mut Option<String> {
    match key {
        "provider" => &mut config.provider,
        "apns_certificate" => &mut config.apns_certificate,
        "apns_certificate_password" => &mut config.apns_certificate_password,
        "apns_environment" => &mut config.apns_environment,
        "apns_topic" => &mut config.apns_topic,
        "fcm_credentials" => &mut config.fcm_credentials,
        "log_level" => &mut config.log_level,
        _ => unreachable!(), // Already validated
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "provider" => {
            value
                .parse::<Provider>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "apns_environment" => {
            value
                .parse::<ApnsEnvironment>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "log_level" => {
            if !VALID_LOG_LEVELS.contains(&value.to_lowercase().as_str()) {
                return Err(invalid(format!(
                    "Invalid value '{}'. Valid options: {}",
                    value,
                    VALID_LOG_LEVELS.join(", ")
                )));
            }
        }
        "apns_certificate" | "fcm_credentials" => {
            if value.trim().is_empty() {
                return Err(invalid("Path must not be empty".to_string()));
            }
        }
        _ => {} // password and topic accept any string
    }
    Ok(())
}

/// Value as shown to the user, with secrets masked
fn display_value(key: &str, value: &str) -> String {
    if key == "apns_certificate_password" {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Mask a secret for display (show first 2 and last 2 chars)
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

//! Main app runner for a single push

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

use crate::application::ports::ConfigStore;
use crate::application::PushDispatcher;
use crate::domain::config::AppConfig;
use crate::domain::payload::NotificationPayload;
use crate::domain::provider::ApnsEnvironment;
use crate::infrastructure::{ApnsSender, FcmSender, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Environment variable holding the P12 certificate password
pub const ENV_APNS_CERT_PASSWORD: &str = "CALLKEEP_APNS_CERT_PASSWORD";

/// Environment variable selecting the APNs gateway
pub const ENV_APNS_ENV: &str = "CALLKEEP_APNS_ENV";

/// Everything needed to send one push
#[derive(Debug, Clone)]
pub struct PushOptions {
    pub provider: String,
    pub device_token: String,
    pub payload: NotificationPayload,
    pub apns_certificate: PathBuf,
    pub apns_certificate_password: String,
    pub apns_environment: ApnsEnvironment,
    pub apns_topic: Option<String>,
    pub fcm_credentials: PathBuf,
}

impl PushOptions {
    /// Resolve options for an incoming-call push from merged config
    pub fn from_config(config: &AppConfig, device_token: &str, caller_id: &str) -> Self {
        Self {
            provider: config.provider_or_default().to_string(),
            device_token: device_token.to_string(),
            payload: NotificationPayload::incoming_call(caller_id),
            apns_certificate: config.apns_certificate_or_default(),
            apns_certificate_password: config.apns_certificate_password_or_default().to_string(),
            apns_environment: config.apns_environment_or_default(),
            apns_topic: config.apns_topic.clone(),
            fcm_credentials: config.fcm_credentials_or_default(),
        }
    }
}

/// Wire both senders into a dispatcher
pub fn build_dispatcher(options: &PushOptions) -> PushDispatcher<ApnsSender, FcmSender> {
    let apns = ApnsSender::from_certificate(
        options.apns_certificate.clone(),
        options.apns_certificate_password.clone(),
        options.apns_environment,
    )
    .with_topic(options.apns_topic.clone());
    let fcm = FcmSender::new(options.fcm_credentials.clone());

    PushDispatcher::new(apns, fcm)
}

/// Send the push and report the outcome
pub async fn run_push(options: PushOptions, presenter: &mut Presenter) -> ExitCode {
    let dispatcher = build_dispatcher(&options);

    presenter.start_spinner(&format!("Sending push via {}...", options.provider));
    let result = dispatcher
        .dispatch(&options.provider, &options.device_token, &options.payload)
        .await;
    presenter.stop_spinner();

    match result {
        Ok(receipt) => {
            presenter.receipt(&receipt);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            error!("push failed {}", e);
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// The config layer contributed by environment variables
pub fn env_config() -> AppConfig {
    AppConfig {
        apns_certificate_password: env::var(ENV_APNS_CERT_PASSWORD)
            .ok()
            .filter(|s| !s.is_empty()),
        apns_environment: env::var(ENV_APNS_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig, presenter: &Presenter) -> AppConfig {
    load_merged_config_from(&XdgConfigStore::new(), cli_config, presenter).await
}

/// Same as [`load_merged_config`] with an explicit store
pub async fn load_merged_config_from<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
    presenter: &Presenter,
) -> AppConfig {
    let file_config = store.load().await.unwrap_or_else(|e| {
        presenter.warn(&format!("Ignoring config file: {}", e));
        AppConfig::empty()
    });

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

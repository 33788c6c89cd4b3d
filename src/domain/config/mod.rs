//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_APNS_CERTIFICATE, DEFAULT_FCM_CREDENTIALS, DEFAULT_LOG_LEVEL,
};

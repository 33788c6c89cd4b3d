//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with APNs, FCM and the config file on disk.

pub mod apns;
pub mod config;
pub mod fcm;

// Re-export adapters
pub use apns::ApnsSender;
pub use config::XdgConfigStore;
pub use fcm::FcmSender;

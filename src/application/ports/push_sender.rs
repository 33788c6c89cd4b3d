//! Push sender port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payload::NotificationPayload;
use crate::domain::provider::Provider;

/// Push delivery errors
#[derive(Debug, Clone, Error)]
pub enum PushError {
    #[error("Failed to load credentials: {0}")]
    Credentials(String),

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Push request failed: {0}")]
    RequestFailed(String),

    #[error("Push rejected (HTTP {status}): {reason}")]
    Rejected { status: u16, reason: String },

    #[error("Failed to parse provider response: {0}")]
    ParseError(String),
}

/// What the provider handed back for an accepted push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    pub provider: Provider,
    /// `apns-id` for APNs, the message resource name for FCM
    pub message_id: String,
    pub status: u16,
}

/// Port for delivering one notification to one device
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Send `payload` to the device addressed by `token`.
    ///
    /// # Arguments
    /// * `token` - The provider-issued device token
    /// * `payload` - Key/value data delivered to the app
    ///
    /// # Returns
    /// The provider receipt or an error
    async fn send(
        &self,
        token: &str,
        payload: &NotificationPayload,
    ) -> Result<PushReceipt, PushError>;

    /// The provider this sender delivers through
    fn provider(&self) -> Provider;
}

/// Blanket implementation for boxed sender types
#[async_trait]
impl PushSender for Box<dyn PushSender> {
    async fn send(
        &self,
        token: &str,
        payload: &NotificationPayload,
    ) -> Result<PushReceipt, PushError> {
        self.as_ref().send(token, payload).await
    }

    fn provider(&self) -> Provider {
        self.as_ref().provider()
    }
}

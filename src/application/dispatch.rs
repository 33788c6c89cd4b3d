//! Push dispatch use case

use thiserror::Error;
use tracing::{info, info_span, Instrument};

use crate::domain::error::ProviderNotFound;
use crate::domain::payload::NotificationPayload;
use crate::domain::provider::Provider;

use super::ports::{PushError, PushReceipt, PushSender};

/// Errors from the dispatch use case
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    ProviderNotFound(#[from] ProviderNotFound),

    #[error(transparent)]
    Push(#[from] PushError),
}

/// Routes a push to the sender matching the requested provider
pub struct PushDispatcher<A, F>
where
    A: PushSender,
    F: PushSender,
{
    apns: A,
    fcm: F,
}

impl<A, F> PushDispatcher<A, F>
where
    A: PushSender,
    F: PushSender,
{
    /// Create a new dispatcher over one sender per provider
    pub fn new(apns: A, fcm: F) -> Self {
        debug_assert_eq!(apns.provider(), Provider::Apns, "apns slot wired to wrong sender");
        debug_assert_eq!(fcm.provider(), Provider::Fcm, "fcm slot wired to wrong sender");
        Self { apns, fcm }
    }

    /// Send through the provider named `provider`.
    ///
    /// Unknown names fail with [`DispatchError::ProviderNotFound`] before
    /// any sender is touched.
    pub async fn dispatch(
        &self,
        provider: &str,
        token: &str,
        payload: &NotificationPayload,
    ) -> Result<PushReceipt, DispatchError> {
        info!("CallKeep push request");
        info!(provider, token, "request target");
        info!("payload=\n{}", payload.to_pretty_json());

        let provider: Provider = provider.parse()?;
        self.dispatch_to(provider, token, payload).await
    }

    /// Send through an already-resolved provider
    pub async fn dispatch_to(
        &self,
        provider: Provider,
        token: &str,
        payload: &NotificationPayload,
    ) -> Result<PushReceipt, DispatchError> {
        let span = info_span!("push", provider = provider.as_str());

        let result = async {
            match provider {
                Provider::Apns => self.apns.send(token, payload).await,
                Provider::Fcm => self.fcm.send(token, payload).await,
            }
        }
        .instrument(span)
        .await;

        // Failures are reported once, by the caller
        let receipt = result?;
        info!(
            provider = provider.as_str(),
            message_id = %receipt.message_id,
            "push accepted"
        );
        Ok(receipt)
    }
}

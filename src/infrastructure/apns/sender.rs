//! APNs VoIP push sender adapter

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::application::ports::{PushError, PushReceipt, PushSender};
use crate::domain::payload::NotificationPayload;
use crate::domain::provider::{ApnsEnvironment, Provider};

use super::certificate::client_from_p12_file;

/// PushKit pushes must be sent with this push type
const PUSH_TYPE_VOIP: &str = "voip";

/// Deliver immediately
const PRIORITY_IMMEDIATE: &str = "10";

/// Attempt delivery once and discard if the device is unreachable
const EXPIRATION_NOW: &str = "0";

#[derive(Debug, Deserialize)]
struct ApnsErrorBody {
    reason: String,
}

/// Where the HTTP client comes from
enum Transport {
    /// Loaded from a P12 file when the first push is sent
    Certificate { path: PathBuf, password: String },
    /// Prebuilt client
    Client(Client),
}

/// APNs sender for PushKit VoIP notifications
pub struct ApnsSender {
    transport: Transport,
    endpoint: String,
    topic: Option<String>,
}

impl ApnsSender {
    /// Create a sender authenticating with the P12 certificate at `path`.
    ///
    /// The certificate is read when a push is sent, so constructing the
    /// sender never touches the filesystem.
    pub fn from_certificate(
        path: impl Into<PathBuf>,
        password: impl Into<String>,
        environment: ApnsEnvironment,
    ) -> Self {
        Self {
            transport: Transport::Certificate {
                path: path.into(),
                password: password.into(),
            },
            endpoint: environment.endpoint().to_string(),
            topic: None,
        }
    }

    /// Create a sender using an existing client against a custom endpoint
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            transport: Transport::Client(client),
            endpoint: endpoint.into(),
            topic: None,
        }
    }

    /// Set the `apns-topic` header (usually `<bundle id>.voip`)
    pub fn with_topic(mut self, topic: Option<String>) -> Self {
        self.topic = topic.filter(|t| !t.is_empty());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the device URL
    fn device_url(&self, token: &str) -> String {
        format!("{}/3/device/{}", self.endpoint.trim_end_matches('/'), token)
    }

    async fn client(&self) -> Result<Client, PushError> {
        match &self.transport {
            Transport::Certificate { path, password } => {
                debug!(path = %path.display(), "loading APNs certificate");
                client_from_p12_file(path, password).await.inspect_err(|e| {
                    error!("Cert error: {}", e);
                })
            }
            Transport::Client(client) => Ok(client.clone()),
        }
    }

    /// Pull the rejection reason out of an APNs error body
    fn rejection_reason(body: &str) -> String {
        serde_json::from_str::<ApnsErrorBody>(body)
            .map(|b| b.reason)
            .unwrap_or_else(|_| body.trim().to_string())
    }
}

#[async_trait]
impl PushSender for ApnsSender {
    async fn send(
        &self,
        token: &str,
        payload: &NotificationPayload,
    ) -> Result<PushReceipt, PushError> {
        let client = self.client().await?;
        let url = self.device_url(token);

        let mut request = client
            .post(&url)
            .header("apns-push-type", PUSH_TYPE_VOIP)
            .header("apns-priority", PRIORITY_IMMEDIATE)
            .header("apns-expiration", EXPIRATION_NOW)
            .json(payload);

        if let Some(topic) = &self.topic {
            request = request.header("apns-topic", topic);
        }

        let response = request.send().await.map_err(|e| {
            error!("APNs request error: {}", e);
            PushError::RequestFailed(e.to_string())
        })?;

        let status = response.status();
        let apns_id = response
            .headers()
            .get("apns-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if status.is_success() {
            info!(
                status = status.as_u16(),
                apns_id = %apns_id,
                "APNs push response"
            );
            return Ok(PushReceipt {
                provider: Provider::Apns,
                message_id: apns_id,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let reason = Self::rejection_reason(&body);
        error!(
            status = status.as_u16(),
            apns_id = %apns_id,
            reason = %reason,
            "APNs push response"
        );

        Err(PushError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }

    fn provider(&self) -> Provider {
        Provider::Apns
    }
}

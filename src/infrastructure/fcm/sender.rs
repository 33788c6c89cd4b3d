//! FCM data message sender adapter

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::application::ports::{PushError, PushReceipt, PushSender};
use crate::domain::payload::NotificationPayload;
use crate::domain::provider::Provider;

use super::credentials::ServiceAccountKey;

/// FCM HTTP v1 API base URL
const API_BASE_URL: &str = "https://fcm.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Request types for the FCM v1 API

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    data: &'a NotificationPayload,
}

// Response types for the FCM v1 API

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    error_code: Option<String>,
}

/// FCM sender for data-only messages
pub struct FcmSender {
    credentials_path: PathBuf,
    endpoint: String,
    client: reqwest::Client,
}

impl FcmSender {
    /// Create a sender using the service account file at `credentials_path`.
    ///
    /// The file is read when a message is sent.
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            credentials_path: credentials_path.into(),
            endpoint: API_BASE_URL.to_string(),
            client,
        }
    }

    /// Point the sender at a different FCM base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the send URL for a project
    fn send_url(&self, project_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint.trim_end_matches('/'),
            project_id
        )
    }

    /// Turn an FCM error body into a short reason
    fn rejection_reason(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse { error }) => {
                let code = error
                    .details
                    .iter()
                    .find_map(|d| d.error_code.clone())
                    .or(error.status);
                match code {
                    Some(code) => format!("{} ({})", error.message, code),
                    None => error.message,
                }
            }
            Err(_) => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl PushSender for FcmSender {
    async fn send(
        &self,
        token: &str,
        payload: &NotificationPayload,
    ) -> Result<PushReceipt, PushError> {
        let account = ServiceAccountKey::from_file(&self.credentials_path)
            .await
            .inspect_err(|e| error!("FCMPush: err {}", e))?;

        let access_token = account
            .access_token(&self.client)
            .await
            .inspect_err(|e| error!("FCMPush: err {}", e))?;

        let body = SendRequest {
            message: Message {
                token,
                data: payload,
            },
        };

        let response = self
            .client
            .post(self.send_url(&account.project_id))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("FCMPush: err {}", e);
                PushError::RequestFailed(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let reason = Self::rejection_reason(&error_text);
            error!(status = status.as_u16(), "FCMPush: err {}", reason);
            return Err(PushError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| PushError::ParseError(e.to_string()))?;

        info!("Successfully sent message: {}", sent.name);

        Ok(PushReceipt {
            provider: Provider::Fcm,
            message_id: sent.name,
            status: status.as_u16(),
        })
    }

    fn provider(&self) -> Provider {
        Provider::Fcm
    }
}

//! Google service account credentials and OAuth2 token exchange

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::application::ports::PushError;

/// OAuth scope required by the FCM HTTP v1 API
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime of the signed assertion, the maximum Google accepts
const ASSERTION_LIFETIME_SECS: u64 = 3600;

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// The fields of a service account key file this tool needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    /// Parse a service account JSON document
    pub fn from_json(content: &str) -> Result<Self, PushError> {
        serde_json::from_str(content)
            .map_err(|e| PushError::Credentials(format!("invalid service account: {}", e)))
    }

    /// Read and parse the service account file at `path`
    pub async fn from_file(path: &Path) -> Result<Self, PushError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            PushError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Sign the JWT assertion exchanged for an access token
    pub fn signed_assertion(&self, issued_at: u64) -> Result<String, PushError> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: FCM_SCOPE,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| PushError::Credentials(format!("invalid private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| PushError::Credentials(format!("failed to sign assertion: {}", e)))
    }

    /// Exchange a freshly signed assertion for an OAuth2 access token
    pub async fn access_token(&self, client: &Client) -> Result<String, PushError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| PushError::Auth(e.to_string()))?
            .as_secs();
        let assertion = self.signed_assertion(now)?;

        debug!(token_uri = %self.token_uri, "requesting FCM access token");

        let response = client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| PushError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PushError::Auth(format!("HTTP {}: {}", status, error_text)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PushError::Auth(format!("unreadable token response: {}", e)))?;

        Ok(token.access_token)
    }
}

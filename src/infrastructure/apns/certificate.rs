//! PKCS#12 certificate loading for APNs client authentication

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Identity};
use tokio::fs;

use crate::application::ports::PushError;

/// Per-request timeout for the APNs connection
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse a PKCS#12 bundle into a TLS client identity
pub fn identity_from_p12(der: &[u8], password: &str) -> Result<Identity, PushError> {
    Identity::from_pkcs12_der(der, password)
        .map_err(|e| PushError::Credentials(format!("invalid P12 certificate: {}", e)))
}

/// Read the certificate at `path` and build an HTTP/2 client presenting it
pub async fn client_from_p12_file(path: &Path, password: &str) -> Result<Client, PushError> {
    let der = fs::read(path).await.map_err(|e| {
        PushError::Credentials(format!("cannot read {}: {}", path.display(), e))
    })?;

    let identity = identity_from_p12(&der, password)?;

    Client::builder()
        .use_native_tls()
        .identity(identity)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| PushError::Credentials(format!("failed to build TLS client: {}", e)))
}

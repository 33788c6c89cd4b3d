//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// RSA key used to sign test service account assertions
pub const SERVICE_ACCOUNT_KEY: &str = include_str!("../fixtures/service_account_key.pem");

pub const PROJECT_ID: &str = "callkeep-demo";

/// Write a service account file whose token URI points at `token_uri`
pub fn write_service_account(dir: &Path, token_uri: &str) -> PathBuf {
    let path = dir.join("callkeep-fcm.json");
    let account = serde_json::json!({
        "type": "service_account",
        "project_id": PROJECT_ID,
        "private_key_id": "0123456789abcdef",
        "private_key": SERVICE_ACCOUNT_KEY,
        "client_email": "push@callkeep-demo.iam.gserviceaccount.com",
        "client_id": "1234567890",
        "token_uri": token_uri,
    });
    std::fs::write(&path, account.to_string()).expect("write service account");
    path
}

//! Notification payload value object

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display name sent with every test call
pub const TEST_CALLER_NAME: &str = "push test";

/// Flat string-to-string payload delivered to the device.
///
/// Serializes as a plain JSON object, which is both the APNs request body
/// and the FCM `data` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationPayload(BTreeMap<String, String>);

impl NotificationPayload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload announcing an incoming audio call from `caller_id`
    pub fn incoming_call(caller_id: impl Into<String>) -> Self {
        let mut payload = Self::new();
        payload.insert("caller_id", caller_id);
        payload.insert("caller_name", TEST_CALLER_NAME);
        payload.insert("caller_id_type", "number");
        payload.insert("has_video", "false");
        payload
    }

    /// Set a key, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indented JSON for log output
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

//! FCM infrastructure module
//!
//! Service-account authenticated data messages over the FCM HTTP v1 API.

mod credentials;
mod sender;

pub use credentials::{ServiceAccountKey, FCM_SCOPE};
pub use sender::FcmSender;

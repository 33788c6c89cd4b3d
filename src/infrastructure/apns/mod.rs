//! APNs infrastructure module
//!
//! Certificate-authenticated VoIP pushes over the APNs HTTP/2 API.

mod certificate;
mod sender;

pub use certificate::{client_from_p12_file, identity_from_p12};
pub use sender::ApnsSender;

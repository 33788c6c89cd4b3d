//! CallKeep push tester
//!
//! Sends a single incoming-call push to one device, either as a PushKit VoIP
//! notification through APNs or as a data message through FCM.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Payload, provider kinds, configuration, and errors
//! - **Application**: The push sender port and the dispatch use case
//! - **Infrastructure**: APNs and FCM senders, config file store
//! - **CLI**: Argument parsing, logging setup, and the push runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

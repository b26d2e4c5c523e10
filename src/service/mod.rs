//! Identity service access
//!
//! This module handles HTTP client configuration and the two calls made to
//! the identity endpoint: minting a new id and syncing a local one.

pub mod client;
pub mod network;

pub use client::{HttpIdService, IdService, parse_remote_id};
pub use network::{NetworkManager, RequestOptions};

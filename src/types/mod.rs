//! Type definitions for the SharedId provider
//!
//! This module contains the identity record, the decoded id mapping and the
//! submodule parameters.

pub mod decoded;
pub mod params;
pub mod record;

pub use decoded::{DECODE_NAMESPACE, DecodedId, SharedIdEids};
pub use params::ConfigParams;
pub use record::IdentityRecord;

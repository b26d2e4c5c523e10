//! Decode mode CLI logic
//!
//! Prints the bid-request mapping for a stored value given on the command
//! line. Invalid input decodes to nothing and prints `{}`.

use anyhow::Result;
use std::sync::Arc;

use crate::{
    Settings,
    storage::MemoryCookieStore,
    submodule::{IdSubmodule, SharedIdSubmodule},
};

/// Arguments for decode mode
#[derive(Debug)]
pub struct DecodeArgs {
    /// Stored value as JSON, e.g. `{"id":"abc","ns":true}`
    pub value: String,
}

/// Run decode mode with the given arguments
pub fn run_decode_mode(args: DecodeArgs) -> Result<()> {
    let output = decode_to_string(&args.value)?;
    println!("{}", output);
    Ok(())
}

fn decode_to_string(raw: &str) -> Result<String> {
    // decoding is pure; the service and store are never touched
    let submodule =
        SharedIdSubmodule::from_settings(&Settings::default(), Arc::new(MemoryCookieStore::new()))?;

    let stored = serde_json::from_str::<serde_json::Value>(raw).ok();
    let decoded = submodule
        .decode(stored.as_ref())
        .unwrap_or_else(|| serde_json::json!({}));

    Ok(serde_json::to_string(&decoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_unsynced() {
        let output = decode_to_string(r#"{"id":"abc123","ns":true}"#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["sharedid"]["first"], "abc123");
        assert_eq!(value["sharedid"]["third"], "abc123");
    }

    #[test]
    fn test_decode_invalid_prints_empty_object() {
        assert_eq!(decode_to_string("not json").unwrap(), "{}");
        assert_eq!(decode_to_string(r#"{"ns":true}"#).unwrap(), "{}");
    }
}

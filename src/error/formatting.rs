//! Error formatting utilities
//!
//! Used when a failure is swallowed and only logged, and by the CLI when it
//! reports configuration or storage problems.

use crate::Error;
use std::error::Error as StdError;

/// Format error for display, including the chain of underlying causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::Service { status, message } => {
            format!("Identity service answered {}: {}", status, message)
        }

        Error::Storage { operation, details } => {
            format!("Cookie store failed during {}: {}", operation, details)
        }

        Error::Validation {
            field,
            message,
            value,
        } => match value {
            Some(val) => format!(
                "Validation failed for {} (value: '{}'): {}",
                field, val, message
            ),
            None => format!("Validation failed for {}: {}", field, message),
        },

        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "transport": error.is_transport(),
    });

    match error {
        Error::Service { status, .. } => {
            log_data["status"] = serde_json::Value::Number((*status).into());
        }
        Error::Validation {
            value: Some(value), ..
        } => {
            log_data["value"] = serde_json::Value::String(value.clone());
        }
        _ => {}
    }

    log_data
}

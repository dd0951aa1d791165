//! Error types for background sync.

use thiserror::Error;

/// A single delivery attempt failed. The record stays queued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The endpoint answered with a non-2xx status.
    #[error("Endpoint rejected record with status {status}{}", reason_suffix(.message))]
    Rejected {
        status: u16,
        /// `error` field of the response body, if any.
        message: Option<String>,
    },

    /// No response: offline, DNS, connection reset.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Delivery timed out")]
    Timeout,

    /// The record could not be turned into a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn reason_suffix(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl DeliveryError {
    /// Whether the failure came from the server rather than the link.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DeliveryError::Rejected { .. })
    }
}

/// The host refused a background sync registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncCapabilityError {
    #[error("Background sync is not supported by this host")]
    Unsupported,

    #[error("Host rejected sync tag '{tag}': {reason}")]
    Rejected { tag: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let with_message = DeliveryError::Rejected {
            status: 422,
            message: Some("rating out of range".to_string()),
        };
        assert_eq!(
            with_message.to_string(),
            "Endpoint rejected record with status 422: rating out of range"
        );

        let bare = DeliveryError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "Endpoint rejected record with status 500");
        assert!(bare.is_rejection());
        assert!(!DeliveryError::Timeout.is_rejection());
    }
}

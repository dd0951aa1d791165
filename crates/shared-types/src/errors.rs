//! # Error Types
//!
//! Record validation errors raised at enqueue time.

use thiserror::Error;

/// A record handed to the queue was malformed and was not stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("vote has a blank submission id")]
    BlankSubmissionId,

    #[error("vote has no rating payload")]
    MissingRating,

    #[error("submission payload must be a JSON object")]
    PayloadNotObject,

    #[error("attachment has a blank content type")]
    BlankContentType,

    #[error("attachment is {size} bytes, limit is {max}")]
    AttachmentTooLarge { size: usize, max: usize },
}

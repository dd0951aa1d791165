//! # Domain Entities
//!
//! Records captured while the client has no network confidence.
//!
//! A `New*` value is what a view hands over; the store assigns the local id
//! and enqueue time and returns the matching `Queued*` record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::RecordError;

/// Local auto-increment identifier. Never reused for a different record.
pub type LocalId = u64;

/// Sync tag registered for the vote queue.
pub const SYNC_VOTES_TAG: &str = "sync-votes";

/// Sync tag registered for the submission queue.
pub const SYNC_SUBMISSIONS_TAG: &str = "sync-submissions";

/// The two offline queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    Votes,
    Submissions,
}

impl QueueKind {
    /// Both queues, in the order the runtime drains them.
    pub const ALL: [QueueKind; 2] = [QueueKind::Votes, QueueKind::Submissions];

    /// Wire name used in broadcast messages (`"votes"` / `"submissions"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueKind::Votes => "votes",
            QueueKind::Submissions => "submissions",
        }
    }

    /// Background sync tag for this queue.
    pub fn sync_tag(&self) -> &'static str {
        match self {
            QueueKind::Votes => SYNC_VOTES_TAG,
            QueueKind::Submissions => SYNC_SUBMISSIONS_TAG,
        }
    }

    /// Resolve a sync tag back to its queue.
    pub fn from_sync_tag(tag: &str) -> Option<Self> {
        match tag {
            SYNC_VOTES_TAG => Some(QueueKind::Votes),
            SYNC_SUBMISSIONS_TAG => Some(QueueKind::Submissions),
            _ => None,
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// VOTES
// =============================================================================

/// A vote captured by a view, not yet assigned a local id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVote {
    /// Remote submission the vote applies to (opaque).
    pub submission_id: String,
    /// Rating payload as produced by the voting form.
    pub rating: Value,
}

impl NewVote {
    pub fn new(submission_id: impl Into<String>, rating: Value) -> Self {
        Self {
            submission_id: submission_id.into(),
            rating,
        }
    }

    /// Reject records the replayer could not deliver meaningfully.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.submission_id.trim().is_empty() {
            return Err(RecordError::BlankSubmissionId);
        }
        if self.rating.is_null() {
            return Err(RecordError::MissingRating);
        }
        Ok(())
    }
}

/// A vote waiting in the local store for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedVote {
    pub local_id: LocalId,
    pub submission_id: String,
    pub rating_payload: Value,
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedVote {
    /// JSON body posted to the vote endpoint.
    pub fn delivery_body(&self) -> Value {
        serde_json::json!({
            "submissionId": self.submission_id,
            "rating": self.rating_payload,
        })
    }
}

// =============================================================================
// SUBMISSIONS
// =============================================================================

/// Binary media attached to a submission.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: Option<String>,
    pub content_type: String,
    #[serde(with = "hex")]
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: None,
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn validate(&self, max_bytes: usize) -> Result<(), RecordError> {
        if self.content_type.trim().is_empty() {
            return Err(RecordError::BlankContentType);
        }
        if self.bytes.len() > max_bytes {
            return Err(RecordError::AttachmentTooLarge {
                size: self.bytes.len(),
                max: max_bytes,
            });
        }
        Ok(())
    }
}

// Media blobs are large; keep them out of log lines.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A competition entry captured by a view, not yet assigned a local id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    /// Entry form data (title, description, competition id, ...).
    pub payload: Value,
}

impl NewSubmission {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if !self.payload.is_object() {
            return Err(RecordError::PayloadNotObject);
        }
        Ok(())
    }
}

/// A submission waiting in the local store for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedSubmission {
    pub local_id: LocalId,
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedSubmission {
    /// JSON body posted to the submission endpoint. Attachments are not part
    /// of the replayed body.
    pub fn delivery_body(&self) -> Value {
        self.payload.clone()
    }
}

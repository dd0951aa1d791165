//! Key layout inside the local store.
//!
//! ```text
//! vote/00000000000000000001        -> QueuedVote (JSON)
//! submission/00000000000000000001  -> QueuedSubmission (JSON)
//! meta/next-id/votes               -> u64 (LE)
//! meta/next-id/submissions         -> u64 (LE)
//! meta/high-water/votes            -> u64 (LE)
//! meta/high-water/submissions      -> u64 (LE)
//! ```
//!
//! Ids are zero-padded so lexical key order equals insertion order.
//! The high-water mark is written with every record and never deleted, so
//! it still bounds the id space after the newest records were removed.

use shared_types::{LocalId, QueueKind};

/// First id handed out by an empty store.
pub const FIRST_LOCAL_ID: LocalId = 1;

pub fn record_prefix(kind: QueueKind) -> &'static [u8] {
    match kind {
        QueueKind::Votes => b"vote/",
        QueueKind::Submissions => b"submission/",
    }
}

pub fn record_key(kind: QueueKind, id: LocalId) -> Vec<u8> {
    let mut key = record_prefix(kind).to_vec();
    key.extend_from_slice(format!("{:020}", id).as_bytes());
    key
}

pub fn counter_key(kind: QueueKind) -> Vec<u8> {
    format!("meta/next-id/{}", kind.as_str()).into_bytes()
}

pub fn high_water_key(kind: QueueKind) -> Vec<u8> {
    format!("meta/high-water/{}", kind.as_str()).into_bytes()
}

pub fn encode_counter(next: LocalId) -> [u8; 8] {
    next.to_le_bytes()
}

pub fn decode_counter(bytes: &[u8]) -> Option<LocalId> {
    let raw: [u8; 8] = bytes.try_into().ok()?;
    Some(LocalId::from_le_bytes(raw))
}

//! # Domain Layer

pub mod errors;

/// Store key of the persisted count.
pub const BADGE_KEY: &[u8] = b"badge/count";

/// New count after applying `delta`, floored at zero.
pub fn apply_delta(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta.unsigned_abs())
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

pub(crate) fn encode_count(count: u64) -> [u8; 8] {
    count.to_le_bytes()
}

/// `None` for anything that is not a stored count.
pub(crate) fn decode_count(bytes: &[u8]) -> Option<u64> {
    let raw: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_le_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decrement_below_zero_clamps() {
        assert_eq!(apply_delta(2, -5), 0);
        assert_eq!(apply_delta(0, -1), 0);
        assert_eq!(apply_delta(3, 1), 4);
    }

    #[test]
    fn test_extreme_deltas() {
        assert_eq!(apply_delta(5, i64::MIN), 0);
        assert_eq!(apply_delta(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_decode_rejects_foreign_bytes() {
        assert_eq!(decode_count(&encode_count(7)), Some(7));
        assert_eq!(decode_count(b"-3"), None);
    }

    proptest! {
        #[test]
        fn prop_sequence_tracks_clamped_sum(deltas in proptest::collection::vec(-20i64..20, 0..64)) {
            let mut count = 0u64;
            let mut expected: i64 = 0;
            for delta in deltas {
                count = apply_delta(count, delta);
                expected = (expected + delta).max(0);
                prop_assert_eq!(count as i64, expected);
            }
        }
    }
}

use proptest::prelude::*;

use gate_types::{Answer, QuestionHash, QuestionId, Timestamp, TxHash};

proptest! {
    /// TxHash roundtrip: new -> as_bytes -> new produces identical hash.
    #[test]
    fn tx_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// QuestionId::is_zero is true only for all-zero bytes.
    #[test]
    fn question_id_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let id = QuestionId::new(bytes);
        prop_assert_eq!(id.is_zero(), bytes == [0u8; 32]);
    }

    /// Display output parses back to the same hash.
    #[test]
    fn question_hash_display_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let hash = QuestionHash::new(bytes);
        let parsed = QuestionHash::from_hex(&hash.to_string()).unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// TxHash bincode serialization roundtrip.
    #[test]
    fn tx_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: TxHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), hash.as_bytes());
    }

    /// Only the exact `1` word counts as an accepted answer.
    #[test]
    fn answer_accepted_only_for_one(value in 0u64..u64::MAX) {
        prop_assert_eq!(Answer::from_u64(value).is_accepted(), value == 1);
    }

    /// No small integer collides with the invalidated sentinel.
    #[test]
    fn answer_small_values_never_invalidated(value in 0u64..u64::MAX) {
        prop_assert!(!Answer::from_u64(value).is_invalidated());
    }

    /// Elapsed time is `now - self`, and never negative.
    #[test]
    fn elapsed_since_saturates(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let (start, now) = (Timestamp::new(a), Timestamp::new(b));
        prop_assert_eq!(start.elapsed_since(now), b.saturating_sub(a));
        prop_assert_eq!(start.elapsed_since(now) == 0, b <= a);
    }

    /// A window of `w` seconds is over exactly when `elapsed >= w`.
    #[test]
    fn window_boundary(finalized in 0u64..1_000_000, window in 0u64..100_000, offset in 0u64..200_000) {
        let elapsed = Timestamp::new(finalized).elapsed_since(Timestamp::new(finalized + offset));
        prop_assert_eq!(elapsed >= window, offset >= window);
    }
}

//! Removal of the per-die obfuscation from reported values.
//!
//! The room reports `value + id * 38` instead of the face value. The offset is
//! part of the protocol and not configurable.

use crate::state::DieId;

/// Multiplier applied to the die identifier by the room.
pub const VALUE_OFFSET: i64 = 38;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeError {
    #[error("die identifier {token:?} is not an integer")]
    InvalidId { token: String },

    #[error("reported value {token:?} is not an integer")]
    InvalidValue { token: String },

    #[error("decoding value {raw} for die {id} overflows")]
    Overflow { id: i64, raw: i64 },
}

/// Decodes `raw` reported for the die identified by the `id` token.
pub fn decode_value(id: &str, raw: i64) -> Result<i64, DecodeError> {
    let id: DieId = id.parse()?;
    decode_for(&id, raw)
}

/// Decodes `raw` reported for an already validated die.
pub fn decode_for(id: &DieId, raw: i64) -> Result<i64, DecodeError> {
    let number = id.number();
    number
        .checked_mul(VALUE_OFFSET)
        .and_then(|offset| raw.checked_sub(offset))
        .ok_or(DecodeError::Overflow { id: number, raw })
}

/// Parses a reported value token.
pub fn parse_raw(token: &str) -> Result<i64, DecodeError> {
    let token = token.trim();
    token.parse().map_err(|_| DecodeError::InvalidValue {
        token: token.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_identifier_offset() {
        assert_eq!(decode_value("10", 384).unwrap(), 4);
        assert_eq!(decode_value("0", 6).unwrap(), 6);
    }

    #[test]
    fn recovers_true_value_for_sample_ids() {
        for id in [1_i64, 37, 12_345, 987_654_321] {
            for value in 0..=6 {
                let raw = value + id * VALUE_OFFSET;
                assert_eq!(decode_value(&id.to_string(), raw).unwrap(), value);
            }
        }
    }

    #[test]
    fn rejects_non_integer_identifier() {
        assert!(matches!(
            decode_value("abc", 1),
            Err(DecodeError::InvalidId { .. })
        ));
    }

    #[test]
    fn reports_overflow_instead_of_panicking() {
        let id: DieId = i64::MAX.to_string().parse().unwrap();
        assert!(matches!(
            decode_for(&id, 0),
            Err(DecodeError::Overflow { .. })
        ));
    }

    #[test]
    fn parses_raw_tokens() {
        assert_eq!(parse_raw(" 42 ").unwrap(), 42);
        assert!(matches!(
            parse_raw("4x"),
            Err(DecodeError::InvalidValue { token }) if token == "4x"
        ));
    }
}

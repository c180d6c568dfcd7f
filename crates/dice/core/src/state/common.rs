use std::fmt;
use std::str::FromStr;

use crate::decode::DecodeError;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of `other` relative to `self`.
    #[inline]
    pub fn delta_to(self, other: Position) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Returns true if `other` lies in the 3×3 neighborhood centered on `self`,
    /// excluding `self`'s own tile.
    pub fn is_adjacent(self, other: Position) -> bool {
        let (dx, dy) = self.delta_to(other);
        (dx, dy) != (0, 0) && dx.abs() <= 1 && dy.abs() <= 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identifier of a single die as reported by the room.
///
/// The token is the canonical decimal form of the number, so `"07"` and
/// `"7"` name the same die. It is what goes back on the wire and what breaks
/// ordering ties; the numeric form keys the value obfuscation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieId {
    token: String,
    number: i64,
}

impl DieId {
    /// Raw identifier token.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Integer form of the identifier.
    pub fn number(&self) -> i64 {
        self.number
    }
}

impl FromStr for DieId {
    type Err = DecodeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let number = token
            .parse::<i64>()
            .map_err(|_| DecodeError::InvalidId {
                token: token.to_owned(),
            })?;

        Ok(Self {
            token: number.to_string(),
            number,
        })
    }
}

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_covers_eight_neighbors_only() {
        let center = Position::new(4, 7);
        let mut count = 0;
        for dx in -2..=2 {
            for dy in -2..=2 {
                if center.is_adjacent(Position::new(4 + dx, 7 + dy)) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 8);
        assert!(!center.is_adjacent(center));
    }

    #[test]
    fn die_id_keeps_token_and_number() {
        let id: DieId = " 1024 ".parse().unwrap();
        assert_eq!(id.as_str(), "1024");
        assert_eq!(id.number(), 1024);
        assert_eq!(id.to_string(), "1024");
    }

    #[test]
    fn die_id_tokens_are_canonical() {
        let padded: DieId = "07".parse().unwrap();
        let plain: DieId = "7".parse().unwrap();
        assert_eq!(padded, plain);
        assert_eq!(padded.as_str(), "7");
        assert_eq!("+12".parse::<DieId>().unwrap().to_string(), "12");
    }

    #[test]
    fn die_id_rejects_non_numeric_tokens() {
        let err = "12a".parse::<DieId>().unwrap_err();
        assert!(matches!(err, DecodeError::InvalidId { token } if token == "12a"));
        assert!("".parse::<DieId>().is_err());
    }
}

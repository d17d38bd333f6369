use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A physical seat: row number plus seat letter, e.g. `12C`.
///
/// Ordering is row first, then letter, which is the order availability
/// listings are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    pub row: u32,
    pub letter: char,
}

impl SeatId {
    pub fn new(row: u32, letter: char) -> Self {
        Self { row, letter }
    }

    /// Zero-based column of the seat letter ('A' is 0).
    pub fn column(&self) -> u32 {
        (self.letter as u32).saturating_sub('A' as u32)
    }

    /// Parse a seat identifier of the form `<row><letter>`.
    pub fn parse(text: &str) -> Result<Self, SeatIdError> {
        let text = text.trim();
        let letter = text.chars().last().ok_or(SeatIdError::Empty)?;

        if !letter.is_ascii_uppercase() {
            return Err(SeatIdError::InvalidLetter(text.to_string()));
        }

        let digits = &text[..text.len() - letter.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SeatIdError::InvalidRow(text.to_string()));
        }

        let row: u32 = digits
            .parse()
            .map_err(|_| SeatIdError::InvalidRow(text.to_string()))?;
        if row == 0 {
            return Err(SeatIdError::InvalidRow(text.to_string()));
        }

        Ok(Self { row, letter })
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatIdError {
    #[error("Seat id is empty")]
    Empty,

    #[error("Seat letter must be an uppercase letter: {0}")]
    InvalidLetter(String),

    #[error("Seat row must be a positive number: {0}")]
    InvalidRow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seat_id() {
        let seat = SeatId::parse("12C").unwrap();
        assert_eq!(seat.row, 12);
        assert_eq!(seat.letter, 'C');
        assert_eq!(seat.column(), 2);
        assert_eq!(seat.to_string(), "12C");
    }

    #[test]
    fn test_reject_malformed_seat_ids() {
        assert_eq!(SeatId::parse(""), Err(SeatIdError::Empty));
        assert!(matches!(SeatId::parse("12c"), Err(SeatIdError::InvalidLetter(_))));
        assert!(matches!(SeatId::parse("12"), Err(SeatIdError::InvalidLetter(_))));
        assert!(matches!(SeatId::parse("C"), Err(SeatIdError::InvalidRow(_))));
        assert!(matches!(SeatId::parse("0A"), Err(SeatIdError::InvalidRow(_))));
        assert!(matches!(SeatId::parse("-1A"), Err(SeatIdError::InvalidRow(_))));
        assert!(matches!(SeatId::parse("1+A"), Err(SeatIdError::InvalidRow(_))));
        assert!(matches!(SeatId::parse("1Ä"), Err(SeatIdError::InvalidLetter(_))));
    }

    #[test]
    fn test_ordering_is_row_then_letter() {
        let mut seats = vec![
            SeatId::new(2, 'A'),
            SeatId::new(1, 'C'),
            SeatId::new(10, 'A'),
            SeatId::new(1, 'A'),
        ];
        seats.sort();

        let rendered: Vec<String> = seats.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["1A", "1C", "2A", "10A"]);
    }

    #[test]
    fn test_seat_id_serializes_as_string() {
        let json = serde_json::to_string(&SeatId::new(7, 'B')).unwrap();
        assert_eq!(json, "\"7B\"");

        let seat: SeatId = serde_json::from_str("\"14F\"").unwrap();
        assert_eq!(seat, SeatId::new(14, 'F'));
        assert!(serde_json::from_str::<SeatId>("\"14f\"").is_err());
    }
}

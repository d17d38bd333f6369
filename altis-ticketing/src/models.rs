use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use altis_catalog::SeatId;

/// Ledger-assigned ticket number, rendered as a plain decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(u64);

impl TicketId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl TryFrom<String> for TicketId {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.to_string()
    }
}

/// A seat sold to one passenger. The price is fixed at issue time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub passenger_name: String,
    pub flight_date: String,
    pub flight_number: String,
    pub seat: SeatId,
    pub price: u32,
    pub active: bool,
    pub issued_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn new(
        id: TicketId,
        passenger_name: String,
        flight_date: String,
        flight_number: String,
        seat: SeatId,
        price: u32,
    ) -> Self {
        Self {
            id,
            passenger_name,
            flight_date,
            flight_number,
            seat,
            price,
            active: true,
            issued_at: Utc::now(),
            cancelled_at: None,
        }
    }

    /// Mark as cancelled (the ledger decides whether to keep it)
    pub fn cancel(&mut self) {
        self.active = false;
        self.cancelled_at = Some(Utc::now());
    }

    pub fn is_for_flight(&self, date: &str, flight_number: &str) -> bool {
        self.flight_date == date && self.flight_number == flight_number
    }
}

/// What happens to a ticket once it is cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetentionPolicy {
    /// Drop the ticket from the ledger
    #[default]
    Discard,
    /// Keep it, inactive, for audit
    Retain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_id_renders_as_decimal() {
        let id = TicketId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<TicketId>().unwrap(), id);
        assert!("4x".parse::<TicketId>().is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }

    #[test]
    fn test_cancel_flips_active() {
        let mut ticket = Ticket::new(
            TicketId::new(1),
            "Alice".to_string(),
            "11.12.2022".to_string(),
            "FQ12".to_string(),
            SeatId::new(2, 'B'),
            100,
        );
        assert!(ticket.active);
        assert!(ticket.is_for_flight("11.12.2022", "FQ12"));

        ticket.cancel();
        assert!(!ticket.active);
        assert!(ticket.cancelled_at.is_some());
    }
}

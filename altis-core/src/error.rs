use altis_catalog::{CatalogError, InventoryError};
use altis_ticketing::LedgerError;

/// Everything a booking command can fail with. None of these are fatal:
/// the engine is left exactly as it was before the failed call.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Flight not found: {flight_number} on {date}")]
    FlightNotFound {
        date: String,
        flight_number: String,
    },

    #[error("Invalid seat: {0}")]
    InvalidSeat(CatalogError),

    #[error("Passenger name must not be empty")]
    InvalidPassenger,

    #[error("Seat {seat} on flight {flight_number} is already booked")]
    SeatUnavailable {
        seat: String,
        flight_number: String,
    },

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("No price band covers row {row}")]
    NoPriceForRow {
        row: u32,
    },

    #[error("Flight {flight_number} on {date} is listed more than once")]
    DuplicateFlight {
        date: String,
        flight_number: String,
    },

    #[error("Reprice rejected: {0}")]
    RepriceConflict(String),

    #[error("Seat inventory out of step: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Ticket ledger failure: {0}")]
    Ledger(#[from] LedgerError),
}

impl BookingError {
    pub fn flight_not_found(date: &str, flight_number: &str) -> Self {
        Self::FlightNotFound {
            date: date.to_string(),
            flight_number: flight_number.to_string(),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

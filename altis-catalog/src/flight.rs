use serde::{Deserialize, Serialize};
use crate::pricing::{PriceBands, parse_price_bands, CatalogParseWarning, MAX_ROWS};
use crate::seat::{SeatId, SeatIdError};

/// Most seat letters a row can carry ('A' through 'Z').
pub const MAX_SEATS_PER_ROW: u8 = 26;

/// Static seat geometry and pricing for one flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FlightCatalogRecord")]
pub struct FlightCatalog {
    date: String,
    flight_number: String,
    seats_per_row: u8,
    price_bands: PriceBands,
}

impl FlightCatalog {
    pub fn new(
        date: impl Into<String>,
        flight_number: impl Into<String>,
        seats_per_row: u8,
        price_bands: PriceBands,
    ) -> Result<Self, CatalogError> {
        if seats_per_row == 0 || seats_per_row > MAX_SEATS_PER_ROW {
            return Err(CatalogError::InvalidSeatsPerRow(seats_per_row as u32));
        }
        if price_bands.num_rows() > MAX_ROWS {
            return Err(CatalogError::TooManyRows(price_bands.num_rows()));
        }

        Ok(Self {
            date: date.into(),
            flight_number: flight_number.into(),
            seats_per_row,
            price_bands,
        })
    }

    /// Build a catalog straight from band text, returning any band warnings.
    pub fn from_band_text(
        date: impl Into<String>,
        flight_number: impl Into<String>,
        seats_per_row: u8,
        band_text: &str,
    ) -> Result<(Self, Vec<CatalogParseWarning>), CatalogError> {
        let parsed = parse_price_bands(band_text);
        let catalog = Self::new(date, flight_number, seats_per_row, parsed.bands)?;
        Ok((catalog, parsed.warnings))
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn seats_per_row(&self) -> u8 {
        self.seats_per_row
    }

    pub fn num_rows(&self) -> u32 {
        self.price_bands.num_rows()
    }

    pub fn price_bands(&self) -> &PriceBands {
        &self.price_bands
    }

    /// Total number of seats on the flight
    pub fn capacity(&self) -> u32 {
        self.num_rows().saturating_mul(self.seats_per_row as u32)
    }

    pub fn price_for_row(&self, row: u32) -> Option<u32> {
        self.price_bands.price_for_row(row)
    }

    /// Whether an already parsed seat exists on this flight.
    pub fn contains(&self, seat: &SeatId) -> bool {
        seat.row >= 1
            && seat.row <= self.num_rows()
            && seat.letter.is_ascii_uppercase()
            && seat.column() < self.seats_per_row as u32
    }

    /// Parse a seat id and check it against this flight's geometry.
    pub fn parse_seat(&self, text: &str) -> Result<SeatId, CatalogError> {
        let seat = SeatId::parse(text)?;
        if !self.contains(&seat) {
            return Err(CatalogError::SeatOutOfRange {
                seat: seat.to_string(),
                rows: self.num_rows(),
                seats_per_row: self.seats_per_row,
            });
        }
        Ok(seat)
    }

    pub fn is_valid_seat(&self, text: &str) -> bool {
        self.parse_seat(text).is_ok()
    }

    /// Every seat on the flight, row by row, letters in order.
    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        let letters = self.seats_per_row;
        (1..=self.num_rows()).flat_map(move |row| {
            (0..letters).map(move |offset| SeatId::new(row, (b'A' + offset) as char))
        })
    }

    /// Replace the price bands, keeping date, number and row width.
    pub fn with_price_bands(&self, price_bands: PriceBands) -> Result<Self, CatalogError> {
        Self::new(self.date.clone(), self.flight_number.clone(), self.seats_per_row, price_bands)
    }
}

/// Wire shape of a catalog; validated by `FlightCatalog::new` on the way in.
#[derive(Deserialize)]
struct FlightCatalogRecord {
    date: String,
    flight_number: String,
    seats_per_row: u8,
    price_bands: PriceBands,
}

impl TryFrom<FlightCatalogRecord> for FlightCatalog {
    type Error = CatalogError;

    fn try_from(record: FlightCatalogRecord) -> Result<Self, Self::Error> {
        Self::new(record.date, record.flight_number, record.seats_per_row, record.price_bands)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Seats per row must be between 1 and 26, got {0}")]
    InvalidSeatsPerRow(u32),

    #[error("Cabin of {0} rows exceeds the 999 row limit")]
    TooManyRows(u32),

    #[error("Malformed seat id: {0}")]
    MalformedSeat(#[from] SeatIdError),

    #[error("Seat {seat} is outside the cabin ({rows} rows of {seats_per_row} seats)")]
    SeatOutOfRange {
        seat: String,
        rows: u32,
        seats_per_row: u8,
    },
}

use serde::{Deserialize, Serialize};
use std::fmt;
use altis_catalog::{FlightCatalog, SeatInventory};

/// `(date, flight number)` pair identifying a flight
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlightKey {
    pub date: String,
    pub flight_number: String,
}

impl FlightKey {
    pub fn new(date: impl Into<String>, flight_number: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            flight_number: flight_number.into(),
        }
    }

    pub fn of(catalog: &FlightCatalog) -> Self {
        Self::new(catalog.date(), catalog.flight_number())
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.flight_number)
    }
}

/// A catalog paired with its live occupancy
#[derive(Debug, Clone)]
pub(crate) struct Flight {
    pub(crate) catalog: FlightCatalog,
    pub(crate) inventory: SeatInventory,
}

impl Flight {
    pub(crate) fn new(catalog: FlightCatalog) -> Self {
        Self {
            catalog,
            inventory: SeatInventory::new(),
        }
    }
}

/// Read-only view of a flight for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub date: String,
    pub flight_number: String,
    pub seats_per_row: u8,
    pub rows: u32,
    pub price_bands: String,
    pub available_seats: u32,
    pub booked_seats: u32,
}

impl From<&Flight> for FlightSummary {
    fn from(flight: &Flight) -> Self {
        let booked = flight.inventory.booked_count() as u32;
        Self {
            date: flight.catalog.date().to_string(),
            flight_number: flight.catalog.flight_number().to_string(),
            seats_per_row: flight.catalog.seats_per_row(),
            rows: flight.catalog.num_rows(),
            price_bands: flight.catalog.price_bands().to_string(),
            available_seats: flight.catalog.capacity().saturating_sub(booked),
            booked_seats: booked,
        }
    }
}

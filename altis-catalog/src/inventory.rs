use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::flight::FlightCatalog;
use crate::seat::SeatId;

/// Seat occupancy for a single flight.
///
/// Only tracks who sits where. Whether a seat exists at all is the
/// catalog's concern and is checked before anything reaches here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatInventory {
    booked: BTreeMap<SeatId, String>,
}

impl SeatInventory {
    pub fn new() -> Self {
        Self {
            booked: BTreeMap::new(),
        }
    }

    /// Mark a seat as taken by `passenger_name`. Leaves state untouched on failure.
    pub fn book(&mut self, seat: SeatId, passenger_name: &str) -> Result<(), InventoryError> {
        if let Some(holder) = self.booked.get(&seat) {
            return Err(InventoryError::AlreadyBooked {
                seat: seat.to_string(),
                holder: holder.clone(),
            });
        }

        self.booked.insert(seat, passenger_name.to_string());
        Ok(())
    }

    /// Free a seat, returning the passenger that held it
    pub fn release(&mut self, seat: &SeatId) -> Result<String, InventoryError> {
        self.booked
            .remove(seat)
            .ok_or_else(|| InventoryError::NotBooked(seat.to_string()))
    }

    pub fn is_booked(&self, seat: &SeatId) -> bool {
        self.booked.contains_key(seat)
    }

    pub fn passenger(&self, seat: &SeatId) -> Option<&str> {
        self.booked.get(seat).map(String::as_str)
    }

    pub fn booked_count(&self) -> usize {
        self.booked.len()
    }

    /// Booked seats in row-then-letter order
    pub fn booked_seats(&self) -> impl Iterator<Item = &SeatId> {
        self.booked.keys()
    }

    /// Every seat of `catalog` that nobody holds, row by row.
    pub fn list_available(&self, catalog: &FlightCatalog) -> Vec<SeatId> {
        catalog
            .seats()
            .filter(|seat| !self.booked.contains_key(seat))
            .collect()
    }

    /// Share of the cabin currently booked, 0.0 for an empty cabin
    pub fn utilization(&self, catalog: &FlightCatalog) -> f64 {
        let capacity = catalog.capacity();
        if capacity == 0 {
            0.0
        } else {
            self.booked.len() as f64 / capacity as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("Seat {seat} is already booked")]
    AlreadyBooked {
        seat: String,
        holder: String,
    },

    #[error("Seat {0} is not booked")]
    NotBooked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_flight() -> FlightCatalog {
        FlightCatalog::from_band_text("11.12.2022", "FQ12", 2, "1-2 100$").unwrap().0
    }

    #[test]
    fn test_inventory_lifecycle() {
        let mut inventory = SeatInventory::new();
        let seat = SeatId::new(2, 'B');

        // Book
        inventory.book(seat, "Alice").unwrap();
        assert!(inventory.is_booked(&seat));
        assert_eq!(inventory.passenger(&seat), Some("Alice"));

        // Release
        assert_eq!(inventory.release(&seat).unwrap(), "Alice");
        assert!(!inventory.is_booked(&seat));
        assert_eq!(inventory.booked_count(), 0);
    }

    #[test]
    fn test_double_booking_does_not_mutate() {
        let mut inventory = SeatInventory::new();
        let seat = SeatId::new(1, 'A');

        inventory.book(seat, "Alice").unwrap();
        let result = inventory.book(seat, "Bob");

        assert_eq!(
            result,
            Err(InventoryError::AlreadyBooked {
                seat: "1A".to_string(),
                holder: "Alice".to_string(),
            })
        );
        assert_eq!(inventory.passenger(&seat), Some("Alice"));
        assert_eq!(inventory.booked_count(), 1);
    }

    #[test]
    fn test_release_unbooked_seat() {
        let mut inventory = SeatInventory::new();
        let result = inventory.release(&SeatId::new(3, 'C'));
        assert_eq!(result, Err(InventoryError::NotBooked("3C".to_string())));
    }

    #[test]
    fn test_list_available_skips_booked_seats() {
        let flight = small_flight();
        let mut inventory = SeatInventory::new();

        inventory.book(SeatId::new(1, 'B'), "Alice").unwrap();
        inventory.book(SeatId::new(2, 'A'), "Bob").unwrap();

        let available: Vec<String> = inventory
            .list_available(&flight)
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(available, vec!["1A", "2B"]);

        let utilization = inventory.utilization(&flight);
        assert!((utilization - 0.5).abs() < 0.001);
    }
}

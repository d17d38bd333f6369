use std::collections::HashMap;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use altis_catalog::{parse_price_bands, CatalogParseWarning, FlightCatalog, InventoryError, SeatId};
use altis_shared::models::{FlightRepricedEvent, TicketCancelledEvent, TicketIssuedEvent};
use altis_shared::Masked;
use altis_ticketing::{Ticket, TicketId, TicketLedger};
use crate::error::{BookingError, BookingResult};
use crate::flight::{Flight, FlightKey, FlightSummary};

/// A seat that can still be sold, with its current price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatOffer {
    pub seat: SeatId,
    pub price: u32,
}

/// Outcome of a cancellation: who gets how much back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub amount: u32,
    pub passenger_name: String,
    pub ticket: Ticket,
}

/// Owns every flight's inventory and the ticket ledger, and keeps the two
/// consistent: a seat is booked exactly when an active ticket points at it.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    flights: HashMap<FlightKey, Flight>,
    ledger: TicketLedger,
}

impl BookingEngine {
    /// Index the catalogs by `(date, flight number)`. Duplicate keys are rejected.
    pub fn new(catalogs: Vec<FlightCatalog>, ledger: TicketLedger) -> BookingResult<Self> {
        let mut flights = HashMap::with_capacity(catalogs.len());

        for catalog in catalogs {
            let key = FlightKey::of(&catalog);
            if flights.contains_key(&key) {
                return Err(BookingError::DuplicateFlight {
                    date: key.date,
                    flight_number: key.flight_number,
                });
            }
            flights.insert(key, Flight::new(catalog));
        }

        info!("Booking engine ready with {} flights", flights.len());
        Ok(Self { flights, ledger })
    }

    /// Flights sorted by date then number
    pub fn flights(&self) -> Vec<FlightSummary> {
        let mut keys: Vec<&FlightKey> = self.flights.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| FlightSummary::from(&self.flights[key]))
            .collect()
    }

    pub fn catalog(&self, date: &str, flight_number: &str) -> BookingResult<&FlightCatalog> {
        self.flight(date, flight_number).map(|f| &f.catalog)
    }

    pub fn flight_summary(&self, date: &str, flight_number: &str) -> BookingResult<FlightSummary> {
        self.flight(date, flight_number).map(FlightSummary::from)
    }

    pub fn ledger(&self) -> &TicketLedger {
        &self.ledger
    }

    /// Unsold seats with their prices, row then letter
    pub fn check_availability(&self, date: &str, flight_number: &str) -> BookingResult<Vec<SeatOffer>> {
        let flight = self.flight(date, flight_number)?;

        let offers = flight
            .inventory
            .list_available(&flight.catalog)
            .into_iter()
            .map(|seat| {
                let price = flight
                    .catalog
                    .price_for_row(seat.row)
                    .ok_or(BookingError::NoPriceForRow { row: seat.row })?;
                Ok(SeatOffer { seat, price })
            })
            .collect::<BookingResult<Vec<_>>>()?;

        debug!("{} seats available on {} {}", offers.len(), date, flight_number);
        Ok(offers)
    }

    /// Book a seat and issue its ticket as one step.
    pub fn book_seat(
        &mut self,
        date: &str,
        flight_number: &str,
        seat: &str,
        passenger_name: &str,
    ) -> BookingResult<Ticket> {
        let key = FlightKey::new(date, flight_number);
        let flight = self
            .flights
            .get_mut(&key)
            .ok_or_else(|| BookingError::flight_not_found(date, flight_number))?;

        let passenger_name = passenger_name.trim();
        if passenger_name.is_empty() {
            return Err(BookingError::InvalidPassenger);
        }

        let seat = flight.catalog.parse_seat(seat).map_err(BookingError::InvalidSeat)?;

        flight.inventory.book(seat, passenger_name).map_err(|e| match e {
            InventoryError::AlreadyBooked { seat, .. } => BookingError::SeatUnavailable {
                seat,
                flight_number: flight_number.to_string(),
            },
            other => BookingError::Inventory(other),
        })?;

        // From here on the seat is taken; any failure must hand it back.
        let issued = match flight.catalog.price_for_row(seat.row) {
            Some(price) => self
                .ledger
                .issue(passenger_name, date, flight_number, seat, price)
                .map_err(BookingError::from),
            None => Err(BookingError::NoPriceForRow { row: seat.row }),
        };

        let ticket = match issued {
            Ok(ticket) => ticket,
            Err(e) => {
                let _ = flight.inventory.release(&seat);
                warn!("Booking of {} on {} rolled back: {}", seat, key, e);
                return Err(e);
            }
        };

        let event = TicketIssuedEvent {
            ticket_id: ticket.id.to_string(),
            passenger_name: Masked::new(ticket.passenger_name.clone()),
            flight_date: ticket.flight_date.clone(),
            flight_number: ticket.flight_number.clone(),
            seat: seat.to_string(),
            price: ticket.price,
            timestamp: ticket.issued_at.timestamp(),
        };
        info!(event = %event.to_log_payload(), "Ticket {} issued for seat {} on {}", ticket.id, seat, key);

        Ok(ticket)
    }

    /// Cancel a ticket and free its seat as one step.
    pub fn cancel_by_ticket_id(&mut self, id: &TicketId) -> BookingResult<Refund> {
        let ticket = self
            .ledger
            .find_by_id(id)
            .filter(|t| t.active)
            .ok_or_else(|| BookingError::TicketNotFound(id.to_string()))?;

        let key = FlightKey::new(ticket.flight_date.as_str(), ticket.flight_number.as_str());
        let seat = ticket.seat;

        let flight = self
            .flights
            .get_mut(&key)
            .ok_or_else(|| BookingError::flight_not_found(&key.date, &key.flight_number))?;

        let holder = flight.inventory.release(&seat)?;

        let cancelled = match self.ledger.cancel(id) {
            Ok(ticket) => ticket,
            Err(e) => {
                let _ = flight.inventory.book(seat, &holder);
                warn!("Cancellation of ticket {} rolled back: {}", id, e);
                return Err(BookingError::Ledger(e));
            }
        };

        let event = TicketCancelledEvent {
            ticket_id: cancelled.id.to_string(),
            passenger_name: Masked::new(cancelled.passenger_name.clone()),
            flight_date: cancelled.flight_date.clone(),
            flight_number: cancelled.flight_number.clone(),
            seat: seat.to_string(),
            refund: cancelled.price,
            timestamp: Utc::now().timestamp(),
        };
        info!(event = %event.to_log_payload(), "Ticket {} cancelled, seat {} on {} released", id, seat, key);

        Ok(Refund {
            amount: cancelled.price,
            passenger_name: cancelled.passenger_name.clone(),
            ticket: cancelled,
        })
    }

    pub fn view_by_id(&self, id: &TicketId) -> BookingResult<Ticket> {
        self.ledger
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| BookingError::TicketNotFound(id.to_string()))
    }

    pub fn view_by_passenger(&self, passenger_name: &str) -> Vec<Ticket> {
        debug!(passenger = %Masked::new(passenger_name), "Looking up tickets by passenger");
        self.ledger
            .find_by_passenger(passenger_name.trim())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Unknown flights simply have no tickets
    pub fn view_by_flight(&self, date: &str, flight_number: &str) -> Vec<Ticket> {
        self.ledger
            .find_by_flight(date, flight_number)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Swap a flight's price bands. Tickets already issued keep their price.
    pub fn reprice_flight(
        &mut self,
        date: &str,
        flight_number: &str,
        band_text: &str,
    ) -> BookingResult<Vec<CatalogParseWarning>> {
        let key = FlightKey::new(date, flight_number);
        let flight = self
            .flights
            .get_mut(&key)
            .ok_or_else(|| BookingError::flight_not_found(date, flight_number))?;

        let parsed = parse_price_bands(band_text);
        if parsed.bands.is_empty() {
            return Err(BookingError::RepriceConflict(format!(
                "no usable price bands in '{}'",
                band_text
            )));
        }

        let repriced = flight
            .catalog
            .with_price_bands(parsed.bands)
            .map_err(|e| BookingError::RepriceConflict(e.to_string()))?;
        if let Some(stranded) = flight.inventory.booked_seats().find(|s| !repriced.contains(s)) {
            return Err(BookingError::RepriceConflict(format!(
                "booked seat {} would fall outside the new cabin of {} rows",
                stranded,
                repriced.num_rows()
            )));
        }

        flight.catalog = repriced;

        let event = FlightRepricedEvent {
            flight_date: key.date.clone(),
            flight_number: key.flight_number.clone(),
            price_bands: flight.catalog.price_bands().to_string(),
            timestamp: Utc::now().timestamp(),
        };
        info!(event = %event.to_log_payload(), "Flight {} repriced", key);

        for warning in &parsed.warnings {
            warn!("Reprice of {}: {}", key, warning);
        }
        Ok(parsed.warnings)
    }

    fn flight(&self, date: &str, flight_number: &str) -> BookingResult<&Flight> {
        self.flights
            .get(&FlightKey::new(date, flight_number))
            .ok_or_else(|| BookingError::flight_not_found(date, flight_number))
    }
}

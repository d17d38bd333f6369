use crate::models::{RetentionPolicy, Ticket, TicketId};
use altis_catalog::SeatId;
use std::collections::BTreeMap;

/// Authoritative record of issued tickets.
///
/// Ids come from a counter that only moves forward, so iterating the map
/// in key order is the same as iterating in issue order.
#[derive(Debug, Clone)]
pub struct TicketLedger {
    tickets: BTreeMap<TicketId, Ticket>,
    next_id: u64,
    retention: RetentionPolicy,
}

impl TicketLedger {
    pub fn new() -> Self {
        Self::with_retention(RetentionPolicy::default())
    }

    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self {
            tickets: BTreeMap::new(),
            next_id: 1,
            retention,
        }
    }

    /// Start numbering from `next_id` instead of 1
    pub fn starting_at(mut self, next_id: u64) -> Self {
        self.next_id = next_id;
        self
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Issue a ticket under the next id
    pub fn issue(
        &mut self,
        passenger_name: &str,
        flight_date: &str,
        flight_number: &str,
        seat: SeatId,
        price: u32,
    ) -> Result<Ticket, LedgerError> {
        let id = TicketId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(LedgerError::IdSpaceExhausted)?;

        let ticket = Ticket::new(
            id,
            passenger_name.to_string(),
            flight_date.to_string(),
            flight_number.to_string(),
            seat,
            price,
        );

        self.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    /// Cancel an active ticket, returning its final state
    pub fn cancel(&mut self, id: &TicketId) -> Result<Ticket, LedgerError> {
        let ticket = self
            .tickets
            .get_mut(id)
            .filter(|t| t.active)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        ticket.cancel();
        let cancelled = ticket.clone();

        if self.retention == RetentionPolicy::Discard {
            self.tickets.remove(id);
        }

        Ok(cancelled)
    }

    /// Look up a ticket, including retained cancelled ones
    pub fn find_by_id(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    /// Active tickets held by `passenger_name`, in issue order
    pub fn find_by_passenger(&self, passenger_name: &str) -> Vec<&Ticket> {
        self.active()
            .filter(|t| t.passenger_name == passenger_name)
            .collect()
    }

    /// Active tickets on a flight, in issue order
    pub fn find_by_flight(&self, flight_date: &str, flight_number: &str) -> Vec<&Ticket> {
        self.active()
            .filter(|t| t.is_for_flight(flight_date, flight_number))
            .collect()
    }

    /// Everything the ledger holds, cancelled entries included
    pub fn history(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values()
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    fn active(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.values().filter(|t| t.active)
    }
}

impl Default for TicketLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Ticket not found: {0}")]
    NotFound(String),

    #[error("Ticket id space exhausted")]
    IdSpaceExhausted,
}

pub mod events;

pub use events::{TicketIssuedEvent, TicketCancelledEvent, FlightRepricedEvent};

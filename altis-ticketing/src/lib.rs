pub mod models;
pub mod ledger;

pub use models::{Ticket, TicketId, RetentionPolicy};
pub use ledger::{TicketLedger, LedgerError};

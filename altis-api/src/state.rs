use std::sync::Arc;
use tokio::sync::RwLock;
use altis_core::BookingEngine;

/// Shared handle to the booking engine.
///
/// Commands that touch both a seat and the ledger (book, cancel, reprice)
/// run under the write lock for their whole duration.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<BookingEngine>>,
}

impl AppState {
    pub fn new(engine: BookingEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

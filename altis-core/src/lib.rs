pub mod error;
pub mod flight;
pub mod engine;
pub mod repository;

pub use error::{BookingError, BookingResult};
pub use flight::{FlightKey, FlightSummary};
pub use engine::{BookingEngine, Refund, SeatOffer};
pub use repository::{CatalogSource, CatalogLoadError, CatalogLoadWarning, LoadedCatalog, StaticCatalogSource};

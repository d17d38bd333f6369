pub mod seat;
pub mod pricing;
pub mod flight;
pub mod inventory;

pub use seat::{SeatId, SeatIdError};
pub use pricing::{PriceBand, PriceBands, ParsedBands, CatalogParseWarning, parse_price_bands};
pub use flight::{FlightCatalog, CatalogError};
pub use inventory::{SeatInventory, InventoryError};

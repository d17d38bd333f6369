use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use altis_core::BookingError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client errors echo the booking error text; engine faults are logged
/// and answered with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::ValidationError(msg) | AppError::NotFoundError(msg) | AppError::ConflictError(msg) => msg,
            AppError::InternalServerError(msg) => {
                tracing::error!(%status, "Booking engine fault: {}", msg);
                "Internal Server Error".to_string()
            }
            AppError::Anyhow(err) => {
                tracing::error!(%status, "Unhandled error: {:#}", err);
                "Internal Server Error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let msg = err.to_string();
        match err {
            BookingError::FlightNotFound { .. } | BookingError::TicketNotFound(_) => Self::NotFoundError(msg),
            BookingError::InvalidSeat(_) | BookingError::InvalidPassenger => Self::ValidationError(msg),
            BookingError::SeatUnavailable { .. }
            | BookingError::DuplicateFlight { .. }
            | BookingError::RepriceConflict(_) => Self::ConflictError(msg),
            BookingError::NoPriceForRow { .. } | BookingError::Inventory(_) | BookingError::Ledger(_) => {
                Self::InternalServerError(msg)
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altis_ticketing::LedgerError;

    #[test]
    fn test_booking_error_status_mapping() {
        let status = |err: BookingError| AppError::from(err).into_response().status();

        assert_eq!(status(BookingError::TicketNotFound("7".to_string())), StatusCode::NOT_FOUND);
        assert_eq!(status(BookingError::InvalidPassenger), StatusCode::BAD_REQUEST);
        assert_eq!(status(BookingError::RepriceConflict("x".to_string())), StatusCode::CONFLICT);
        assert_eq!(
            status(BookingError::Ledger(LedgerError::NotFound("7".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use altis_core::{FlightSummary, SeatOffer};
use altis_ticketing::Ticket;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub flight_number: String,
    pub seats: Vec<SeatOffer>,
}

#[derive(Debug, Deserialize)]
pub struct RepriceRequest {
    pub price_bands: String,
}

#[derive(Debug, Serialize)]
pub struct RepriceResponse {
    pub flight: FlightSummary,
    pub warnings: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights))
        .route("/v1/flights/{date}/{flight_number}/seats", get(check_availability))
        .route("/v1/flights/{date}/{flight_number}/tickets", get(flight_tickets))
        .route("/v1/flights/{date}/{flight_number}/pricing", put(reprice_flight))
}

async fn list_flights(State(state): State<AppState>) -> Json<Vec<FlightSummary>> {
    let engine = state.engine.read().await;
    Json(engine.flights())
}

async fn check_availability(
    State(state): State<AppState>,
    Path((date, flight_number)): Path<(String, String)>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let engine = state.engine.read().await;
    let seats = engine.check_availability(&date, &flight_number)?;

    Ok(Json(AvailabilityResponse {
        date,
        flight_number,
        seats,
    }))
}

async fn flight_tickets(
    State(state): State<AppState>,
    Path((date, flight_number)): Path<(String, String)>,
) -> Json<Vec<Ticket>> {
    let engine = state.engine.read().await;
    Json(engine.view_by_flight(&date, &flight_number))
}

async fn reprice_flight(
    State(state): State<AppState>,
    Path((date, flight_number)): Path<(String, String)>,
    Json(req): Json<RepriceRequest>,
) -> Result<Json<RepriceResponse>, AppError> {
    let mut engine = state.engine.write().await;
    let warnings = engine.reprice_flight(&date, &flight_number, &req.price_bands)?;
    info!("Repriced {} {} via API", date, flight_number);

    let flight = engine.flight_summary(&date, &flight_number)?;

    Ok(Json(RepriceResponse {
        flight,
        warnings: warnings.iter().map(|w| w.to_string()).collect(),
    }))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use altis_ticketing::{Ticket, TicketId};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct BookSeatRequest {
    pub date: String,
    pub flight_number: String,
    pub seat: String,
    pub passenger_name: String,
}

#[derive(Debug, Serialize)]
pub struct RefundResponse {
    pub ticket_id: TicketId,
    pub refund: u32,
    pub passenger_name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(book_seat))
        .route("/v1/tickets/{id}", get(get_ticket).delete(cancel_ticket))
        .route("/v1/passengers/{name}/tickets", get(passenger_tickets))
}

async fn book_seat(
    State(state): State<AppState>,
    Json(req): Json<BookSeatRequest>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let mut engine = state.engine.write().await;
    let ticket = engine.book_seat(&req.date, &req.flight_number, &req.seat, &req.passenger_name)?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ticket>, AppError> {
    let id = parse_ticket_id(&id)?;
    let engine = state.engine.read().await;
    Ok(Json(engine.view_by_id(&id)?))
}

async fn cancel_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RefundResponse>, AppError> {
    let id = parse_ticket_id(&id)?;
    let mut engine = state.engine.write().await;
    let refund = engine.cancel_by_ticket_id(&id)?;

    Ok(Json(RefundResponse {
        ticket_id: refund.ticket.id,
        refund: refund.amount,
        passenger_name: refund.passenger_name,
    }))
}

async fn passenger_tickets(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Vec<Ticket>> {
    let engine = state.engine.read().await;
    Json(engine.view_by_passenger(&name))
}

fn parse_ticket_id(raw: &str) -> Result<TicketId, AppError> {
    raw.parse()
        .map_err(|_| AppError::ValidationError(format!("Invalid ticket id: {}", raw)))
}

use serde::{Deserialize, Serialize};
use crate::pii::Masked;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TicketIssuedEvent {
    pub ticket_id: String,
    pub passenger_name: Masked<String>,
    pub flight_date: String,
    pub flight_number: String,
    pub seat: String,
    pub price: u32,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TicketCancelledEvent {
    pub ticket_id: String,
    pub passenger_name: Masked<String>,
    pub flight_date: String,
    pub flight_number: String,
    pub seat: String,
    pub refund: u32,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FlightRepricedEvent {
    pub flight_date: String,
    pub flight_number: String,
    pub price_bands: String,
    pub timestamp: i64,
}

impl TicketIssuedEvent {
    /// JSON payload for log lines; the passenger name is masked
    pub fn to_log_payload(&self) -> String {
        log_payload(self)
    }
}

impl TicketCancelledEvent {
    pub fn to_log_payload(&self) -> String {
        log_payload(self)
    }
}

impl FlightRepricedEvent {
    pub fn to_log_payload(&self) -> String {
        log_payload(self)
    }
}

fn log_payload<T: Serialize>(event: &T) -> String {
    match serde_json::to_value(event) {
        Ok(mut value) => {
            if let Some(name) = value.get_mut("passenger_name") {
                *name = serde_json::Value::String(crate::pii::MASK.to_string());
            }
            value.to_string()
        }
        Err(e) => format!("{{\"error\":\"unserializable event: {}\"}}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_event_log_payload_masks_passenger() {
        let event = TicketIssuedEvent {
            ticket_id: "7".to_string(),
            passenger_name: Masked("Alice".to_string()),
            flight_date: "11.12.2022".to_string(),
            flight_number: "FQ12".to_string(),
            seat: "2B".to_string(),
            price: 100,
            timestamp: 0,
        };

        let payload = event.to_log_payload();
        assert!(!payload.contains("Alice"));
        assert!(payload.contains("\"seat\":\"2B\""));
        assert!(payload.contains("\"price\":100"));

        // Full serialization still carries the real name
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("Alice"));
    }
}

//! Line-oriented front end over the booking engine.
//!
//! ```text
//! > check 11.12.2022 FQ12
//! > book 11.12.2022 FQ12 1A Alice Smith
//! > return 1
//! > view 1
//! > view username Alice Smith
//! > view flight 11.12.2022 FQ12
//! ```

use std::io::{self, BufRead, Write};
use altis_core::{BookingEngine, SeatOffer};
use altis_ticketing::{Ticket, TicketId};

pub const USAGE: &str = "\
Commands:
  check <date> <flight>
  book <date> <flight> <seat> <passenger name>
  return <ticket id>
  view <ticket id>
  view username <passenger name>
  view flight <date> <flight>
  flights
  help
  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check { date: String, flight_number: String },
    Book { date: String, flight_number: String, seat: String, passenger_name: String },
    Return { ticket_id: TicketId },
    ViewTicket { ticket_id: TicketId },
    ViewPassenger { passenger_name: String },
    ViewFlight { date: String, flight_number: String },
    Flights,
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid ticket id: {0}")]
    InvalidTicketId(String),
}

impl Command {
    /// Parse one input line. Passenger names run to the end of the line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let Some((verb, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match verb {
            "check" => {
                let [date, flight_number] = words(rest).ok_or(CommandError::Usage("check <date> <flight>"))?;
                Command::Check { date, flight_number }
            }
            "book" => {
                let usage = CommandError::Usage("book <date> <flight> <seat> <passenger name>");
                let (date, rest) = split_word(rest).ok_or(usage.clone())?;
                let (flight_number, rest) = split_word(rest).ok_or(usage.clone())?;
                let (seat, passenger_name) = split_word(rest).ok_or(usage.clone())?;
                if passenger_name.is_empty() {
                    return Err(usage);
                }
                Command::Book {
                    date: date.to_string(),
                    flight_number: flight_number.to_string(),
                    seat: seat.to_string(),
                    passenger_name: passenger_name.to_string(),
                }
            }
            "return" => {
                let [id] = words(rest).ok_or(CommandError::Usage("return <ticket id>"))?;
                Command::Return { ticket_id: parse_ticket_id(&id)? }
            }
            "view" => match split_word(rest) {
                Some(("username", "")) => return Err(CommandError::Usage("view username <passenger name>")),
                Some(("username", name)) => Command::ViewPassenger {
                    passenger_name: name.to_string(),
                },
                Some(("flight", args)) => {
                    let [date, flight_number] = words(args).ok_or(CommandError::Usage("view flight <date> <flight>"))?;
                    Command::ViewFlight { date, flight_number }
                }
                Some((id, "")) => Command::ViewTicket { ticket_id: parse_ticket_id(id)? },
                _ => return Err(CommandError::Usage("view <ticket id> | view username <name> | view flight <date> <flight>")),
            },
            "flights" => Command::Flights,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Runs commands against an engine it owns, rendering results as text
pub struct Console {
    engine: BookingEngine,
}

impl Console {
    pub fn new(engine: BookingEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &BookingEngine {
        &self.engine
    }

    /// Execute one command and render the reply
    pub fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Check { date, flight_number } => match self.engine.check_availability(&date, &flight_number) {
                Ok(seats) if seats.is_empty() => format!("No seats available on {} {}", flight_number, date),
                Ok(seats) => render_seats(&seats),
                Err(e) => format!("Error: {}", e),
            },
            Command::Book { date, flight_number, seat, passenger_name } => {
                match self.engine.book_seat(&date, &flight_number, &seat, &passenger_name) {
                    Ok(ticket) => format!("Confirmed with ID {}", ticket.id),
                    Err(e) => format!("Error: {}", e),
                }
            }
            Command::Return { ticket_id } => match self.engine.cancel_by_ticket_id(&ticket_id) {
                Ok(refund) => format!("Confirmed {}$ refund for {}", refund.amount, refund.passenger_name),
                Err(e) => format!("Error: {}", e),
            },
            Command::ViewTicket { ticket_id } => match self.engine.view_by_id(&ticket_id) {
                Ok(ticket) => render_ticket(&ticket),
                Err(e) => format!("Error: {}", e),
            },
            Command::ViewPassenger { passenger_name } => {
                let tickets = self.engine.view_by_passenger(&passenger_name);
                if tickets.is_empty() {
                    return format!("No tickets for {}", passenger_name);
                }
                tickets
                    .iter()
                    .enumerate()
                    .map(|(i, t)| format!("{}. Flight {}, {}, seat {}, price {}$", i + 1, t.flight_number, t.flight_date, t.seat, t.price))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::ViewFlight { date, flight_number } => {
                let tickets = self.engine.view_by_flight(&date, &flight_number);
                if tickets.is_empty() {
                    return format!("No tickets on {} {}", flight_number, date);
                }
                tickets
                    .iter()
                    .enumerate()
                    .map(|(i, t)| format!("{}. {} {} {}$", i + 1, t.passenger_name, t.seat, t.price))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Command::Flights => self
                .engine
                .flights()
                .iter()
                .map(|f| {
                    format!(
                        "Date: {}, Flight: {}, Seats per row: {}, Rows: {} ({}), Available: {}",
                        f.date, f.flight_number, f.seats_per_row, f.rows, f.price_bands, f.available_seats
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Help => USAGE.to_string(),
            Command::Exit => String::new(),
        }
    }

    /// Prompt, read and execute until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let mut lines = input.lines();

        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(output)?;
                break;
            };

            match Command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Exit)) => break,
                Ok(Some(command)) => writeln!(output, "{}", self.execute(command))?,
                Err(e) => writeln!(output, "{}", e)?,
            }
        }

        Ok(())
    }
}

fn render_seats(seats: &[SeatOffer]) -> String {
    seats
        .iter()
        .map(|offer| format!("{} {}$", offer.seat, offer.price))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_ticket(ticket: &Ticket) -> String {
    let status = if ticket.active { "" } else { " (cancelled)" };
    format!(
        "Flight {}, {}, seat {}, price {}$, {}{}",
        ticket.flight_number, ticket.flight_date, ticket.seat, ticket.price, ticket.passenger_name, status
    )
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    Some((&text[..end], text[end..].trim()))
}

/// Exactly `N` whitespace-separated words, or nothing
fn words<const N: usize>(text: &str) -> Option<[String; N]> {
    let parts: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    parts.try_into().ok()
}

fn parse_ticket_id(raw: &str) -> Result<TicketId, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidTicketId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use altis_catalog::FlightCatalog;
    use altis_ticketing::TicketLedger;

    fn console() -> Console {
        let (flight, _) = FlightCatalog::from_band_text("11.12.2022", "FQ12", 3, "1-2 100$ 3-5 150$").unwrap();
        Console::new(BookingEngine::new(vec![flight], TicketLedger::new()).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("book 11.12.2022 FQ12 1A Alice Smith").unwrap(),
            Some(Command::Book {
                date: "11.12.2022".to_string(),
                flight_number: "FQ12".to_string(),
                seat: "1A".to_string(),
                passenger_name: "Alice Smith".to_string(),
            })
        );
        assert_eq!(
            Command::parse("view username  Alice Smith ").unwrap(),
            Some(Command::ViewPassenger { passenger_name: "Alice Smith".to_string() })
        );
        assert_eq!(
            Command::parse("view 7").unwrap(),
            Some(Command::ViewTicket { ticket_id: TicketId::new(7) })
        );
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("fly away"), Err(CommandError::Unknown("fly".to_string())));
        assert!(matches!(Command::parse("check 11.12.2022"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("book 11.12.2022 FQ12 1A"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("return abc"), Err(CommandError::InvalidTicketId(_))));
        assert!(matches!(Command::parse("view"), Err(CommandError::Usage(_))));
        assert_eq!(
            Command::parse("view username "),
            Err(CommandError::Usage("view username <passenger name>"))
        );
    }

    #[test]
    fn test_session() {
        let mut console = console();
        let input = "\
book 11.12.2022 FQ12 2B Alice
book 11.12.2022 FQ12 2B Bob
view 1
view username Alice
return 1
return 1
bogus
exit
check 11.12.2022 FQ12
";
        let mut output = Vec::new();
        console.run(input.as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("> Confirmed with ID 1\n"));
        assert!(output.contains("Error: Seat 2B on flight FQ12 is already booked"));
        assert!(output.contains("Flight FQ12, 11.12.2022, seat 2B, price 100$, Alice"));
        assert!(output.contains("1. Flight FQ12, 11.12.2022, seat 2B, price 100$"));
        assert!(output.contains("Confirmed 100$ refund for Alice"));
        assert!(output.contains("Error: Ticket not found: 1"));
        assert!(output.contains("Unknown command: bogus"));
        // Nothing after exit runs
        assert!(!output.contains("1A 100$"));
    }

    #[test]
    fn test_check_lists_prices() {
        let mut console = console();
        console.execute(Command::Book {
            date: "11.12.2022".to_string(),
            flight_number: "FQ12".to_string(),
            seat: "1B".to_string(),
            passenger_name: "Alice".to_string(),
        });

        let reply = console.execute(Command::Check {
            date: "11.12.2022".to_string(),
            flight_number: "FQ12".to_string(),
        });
        assert!(reply.starts_with("1A 100$, 1C 100$, 2A 100$"));
        assert!(reply.ends_with("5C 150$"));

        let reply = console.execute(Command::Check {
            date: "11.12.2022".to_string(),
            flight_number: "XX00".to_string(),
        });
        assert_eq!(reply, "Error: Flight not found: XX00 on 11.12.2022");
    }
}

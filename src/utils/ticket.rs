use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Número de talón tal como lo devuelve la base: un entero crudo o un string
/// ya formateado. Se trata como valor opaco de display; solo el entero crudo
/// se rellena con ceros a 4 dígitos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TicketNumber {
    Number(i64),
    Text(String),
}

impl TicketNumber {
    /// Parsea el valor que llega por query string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => TicketNumber::Number(n),
            Err(_) => TicketNumber::Text(trimmed.to_string()),
        }
    }

    pub fn formatted(&self) -> String {
        match self {
            TicketNumber::Number(n) => format!("{n:04}"),
            TicketNumber::Text(s) => s.clone(),
        }
    }
}

impl From<i32> for TicketNumber {
    fn from(n: i32) -> Self {
        TicketNumber::Number(n as i64)
    }
}

/// Nombre de archivo del talón descargable.
pub fn talon_filename(ticket: &TicketNumber) -> String {
    format!("talon-participacion-{}.pdf", ticket.formatted())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ticket_is_zero_padded() {
        assert_eq!(TicketNumber::Number(7).formatted(), "0007");
        assert_eq!(TicketNumber::Number(42).formatted(), "0042");
        assert_eq!(TicketNumber::Number(12345).formatted(), "12345");
    }

    #[test]
    fn test_preformatted_ticket_passes_through() {
        assert_eq!(TicketNumber::Text("A-12".to_string()).formatted(), "A-12");
        assert_eq!(TicketNumber::Text("0001".to_string()).formatted(), "0001");
    }

    #[test]
    fn test_parse_from_query() {
        assert_eq!(TicketNumber::parse("7"), TicketNumber::Number(7));
        assert_eq!(TicketNumber::parse(" 7 "), TicketNumber::Number(7));
        assert_eq!(
            TicketNumber::parse("A-12"),
            TicketNumber::Text("A-12".to_string())
        );
    }

    #[test]
    fn test_talon_filename() {
        assert_eq!(
            talon_filename(&TicketNumber::Number(7)),
            "talon-participacion-0007.pdf"
        );
        assert_eq!(
            talon_filename(&TicketNumber::Text("A-12".to_string())),
            "talon-participacion-A-12.pdf"
        );
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{participant_entity as participants, prize_entity as prizes,
    raffle_entity as raffles};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRaffleRequest {
    #[schema(example = "Sorteo Marzo 2026")]
    pub name: String,
    /// Día del evento (YYYY-MM-DD); sin fecha nadie puede participar todavía
    pub raffle_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRaffleRequest {
    pub name: Option<String>,
    pub raffle_date: Option<NaiveDate>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RaffleResponse {
    pub id: i64,
    pub name: String,
    pub raffle_date: Option<NaiveDate>,
    pub active: bool,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<raffles::Model> for RaffleResponse {
    fn from(m: raffles::Model) -> Self {
        RaffleResponse {
            id: m.id,
            name: m.name,
            raffle_date: m.raffle_date,
            active: m.active,
            participant_count: 0,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Parámetros del listado de participantes de un sorteo
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ParticipantQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantAdminResponse {
    pub id: i64,
    pub name: String,
    pub whatsapp: String,
    pub ticket_number: i32,
    pub comercio_id: i64,
    /// Nombre del comercio desde el que se anotó, resuelto aparte
    pub comercio_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<participants::Model> for ParticipantAdminResponse {
    fn from(m: participants::Model) -> Self {
        ParticipantAdminResponse {
            id: m.id,
            name: m.name,
            whatsapp: m.whatsapp,
            ticket_number: m.ticket_number,
            comercio_id: m.comercio_id,
            comercio_name: None,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePrizeRequest {
    #[schema(example = "Orden de compra $5000")]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Si no viene, el premio va al final de la lista
    pub position: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub raffle_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub winner_participant_id: Option<i64>,
}

impl From<prizes::Model> for PrizeResponse {
    fn from(m: prizes::Model) -> Self {
        PrizeResponse {
            id: m.id,
            raffle_id: m.raffle_id,
            name: m.name,
            description: m.description,
            image_url: m.image_url,
            position: m.position,
            winner_participant_id: m.winner_participant_id,
        }
    }
}

/// Ganador publicado: iniciales + teléfono enmascarado, nada más.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicWinnerResponse {
    pub initials: String,
    pub phone_masked: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicPrizeResponse {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub winner: Option<PublicWinnerResponse>,
}

/// El sorteo activo tal como lo ve el sitio público.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicRaffleResponse {
    pub name: String,
    pub raffle_date: Option<NaiveDate>,
    pub prizes: Vec<PublicPrizeResponse>,
}

/// Conteos del tablero del panel.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub members: i64,
    pub comercios: i64,
    pub active_comercios: i64,
    pub active_discounts: i64,
    /// Participaciones del sorteo activo (0 si no hay sorteo activo)
    pub active_raffle_participants: i64,
}

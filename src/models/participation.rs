use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::TicketNumber;

/// Query de resolución: `GET /participar?code=...`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ResolveQuery {
    pub code: String,
}

/// Datos para pintar el formulario de participación.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipationContextResponse {
    pub comercio_name: String,
    pub comercio_slug: String,
    pub raffle_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParticipateRequest {
    pub code: String,
    #[schema(example = "Juan Pérez")]
    pub name: String,
    #[schema(example = "09 123 456")]
    pub whatsapp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipateResponse {
    pub ticket_number: TicketNumber,
}

/// Query del talón: el código del comercio autoriza, el número identifica.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TalonQuery {
    pub code: String,
    pub ticket: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::comercio_entity as comercios;

use super::PublicDiscountResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateComercioRequest {
    pub member_id: i64,
    #[schema(example = "ferox-srl")]
    pub slug: String,
    pub fantasy_name: Option<String>,
    pub logo_url: Option<String>,
    pub short_description: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub website: Option<String>,
    pub whatsapp: Option<String>,
    pub display_address: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateComercioRequest {
    pub slug: Option<String>,
    pub fantasy_name: Option<String>,
    pub logo_url: Option<String>,
    pub short_description: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub website: Option<String>,
    pub whatsapp: Option<String>,
    pub display_address: Option<String>,
    pub active: Option<bool>,
}

/// Vista del panel: incluye el código secreto (para armar el cartel) y el
/// socio dueño.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminComercioResponse {
    pub id: i64,
    pub member_id: i64,
    /// Nombre del socio dueño, resuelto aparte del modelo
    pub member_name: Option<String>,
    pub slug: String,
    pub fantasy_name: Option<String>,
    pub logo_url: Option<String>,
    pub short_description: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub website: Option<String>,
    pub whatsapp: Option<String>,
    pub display_address: Option<String>,
    pub secret_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<comercios::Model> for AdminComercioResponse {
    fn from(m: comercios::Model) -> Self {
        AdminComercioResponse {
            id: m.id,
            member_id: m.member_id,
            member_name: None,
            slug: m.slug,
            fantasy_name: m.fantasy_name,
            logo_url: m.logo_url,
            short_description: m.short_description,
            instagram: m.instagram,
            facebook: m.facebook,
            website: m.website,
            whatsapp: m.whatsapp,
            display_address: m.display_address,
            secret_code: m.secret_code,
            active: m.active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Tarjeta del directorio público. Nunca lleva el código secreto.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicComercioResponse {
    pub slug: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub short_description: Option<String>,
}

impl From<comercios::Model> for PublicComercioResponse {
    fn from(m: comercios::Model) -> Self {
        let name = m.display_name().to_string();
        PublicComercioResponse {
            slug: m.slug,
            name,
            logo_url: m.logo_url,
            short_description: m.short_description,
        }
    }
}

/// Perfil público completo con sus descuentos vigentes.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicComercioDetailResponse {
    pub slug: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub short_description: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub website: Option<String>,
    pub whatsapp: Option<String>,
    pub display_address: Option<String>,
    pub discounts: Vec<PublicDiscountResponse>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CartelQuery {
    /// a5 (por defecto) o a6
    pub size: Option<String>,
}

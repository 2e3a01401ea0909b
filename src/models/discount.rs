use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::discount_entity as discounts;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDiscountRequest {
    #[schema(example = "20% en efectivo")]
    pub title: String,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateDiscountRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DiscountResponse {
    pub id: i64,
    pub comercio_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub featured: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<discounts::Model> for DiscountResponse {
    fn from(m: discounts::Model) -> Self {
        DiscountResponse {
            id: m.id,
            comercio_id: m.comercio_id,
            title: m.title,
            description: m.description,
            featured: m.featured,
            active: m.active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Vista pública: solo lo que se muestra en el perfil del comercio.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicDiscountResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub featured: bool,
}

impl From<discounts::Model> for PublicDiscountResponse {
    fn from(m: discounts::Model) -> Self {
        PublicDiscountResponse {
            id: m.id,
            title: m.title,
            description: m.description,
            featured: m.featured,
        }
    }
}

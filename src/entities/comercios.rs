use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Comercio adherido al programa.
/// Conceptos:
/// - secret_code: token opaco por comercio; quien lo tiene (cartel impreso en
///   el local) puede anotarse en el sorteo. No es autenticación de identidad.
/// - active: un comercio inactivo desaparece del directorio público y su
///   código deja de resolver.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "comercios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub member_id: i64,
    /// Identificador público en URLs (único)
    pub slug: String,
    pub fantasy_name: Option<String>,
    pub logo_url: Option<String>,
    pub short_description: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub website: Option<String>,
    pub whatsapp: Option<String>,
    pub display_address: Option<String>,
    /// Token de participación impreso en el cartel QR (único)
    pub secret_code: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Nombre que ve el público: fantasía o, en su defecto, el slug.
    pub fn display_name(&self) -> &str {
        self.fantasy_name.as_deref().unwrap_or(&self.slug)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

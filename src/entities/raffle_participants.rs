use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participación en un sorteo.
/// Invariante (en la base, no acá): a lo sumo una fila por
/// (raffle_id, comercio_id, whatsapp). El insert directo contra ese índice
/// único es el único punto de control de concurrencia.
/// ticket_number lo asigna el trigger; se inserta sin setearlo.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "raffle_participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub raffle_id: i64,
    pub comercio_id: i64,
    pub name: String,
    /// Teléfono normalizado (solo dígitos, sin prefijo de país)
    pub whatsapp: String,
    /// Secuencial por sorteo, asignado por la base
    pub ticket_number: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Premio de un sorteo.
/// - position: orden explícito de exhibición (1 = primer premio).
/// - winner_participant_id: se completa a mano cuando se hace el sorteo; esta
///   aplicación solo lo muestra, nunca lo escribe.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "raffle_prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub raffle_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub position: i32,
    pub winner_participant_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

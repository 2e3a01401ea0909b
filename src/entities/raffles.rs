use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sorteo.
/// Conceptos:
/// - raffle_date: el único día calendario (hora de Uruguay) en que se aceptan
///   participaciones. NULL = todavía sin fecha, nadie puede anotarse.
/// - ticket_seq: contador que avanza el trigger de asignación de talones; la
///   aplicación nunca lo toca.
/// - Si hay varios sorteos activos a la vez gana el creado más recientemente
///   (ambigüedad de producto heredada, ver DESIGN.md).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "raffles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub raffle_date: Option<NaiveDate>,
    pub active: bool,
    pub ticket_seq: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity {
    /// Resolución de "el sorteo activo": con varios marcados activos gana el
    /// creado más recientemente, con el id como desempate determinista.
    pub fn newest_active() -> Select<Entity> {
        use sea_orm::{QueryFilter, QueryOrder};

        Self::find()
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

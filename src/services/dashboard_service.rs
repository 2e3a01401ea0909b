use std::sync::Arc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{
    comercio_entity as comercios, discount_entity as discounts, member_entity as members,
    participant_entity as participants, raffle_entity as raffles,
};
use crate::error::AppResult;
use crate::models::DashboardResponse;

#[derive(Clone)]
pub struct DashboardService {
    pool: Arc<DatabaseConnection>,
}

impl DashboardService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Conteos del tablero del panel.
    pub async fn summary(&self) -> AppResult<DashboardResponse> {
        let members = members::Entity::find().count(self.pool.as_ref()).await? as i64;
        let comercios_total = comercios::Entity::find().count(self.pool.as_ref()).await? as i64;
        let active_comercios = comercios::Entity::find()
            .filter(comercios::Column::Active.eq(true))
            .count(self.pool.as_ref())
            .await? as i64;
        let active_discounts = discounts::Entity::find()
            .filter(discounts::Column::Active.eq(true))
            .count(self.pool.as_ref())
            .await? as i64;

        let active_raffle = raffles::Entity::newest_active().one(self.pool.as_ref()).await?;
        let active_raffle_participants = match active_raffle {
            Some(raffle) => {
                participants::Entity::find()
                    .filter(participants::Column::RaffleId.eq(raffle.id))
                    .count(self.pool.as_ref())
                    .await? as i64
            }
            None => 0,
        };

        Ok(DashboardResponse {
            members,
            comercios: comercios_total,
            active_comercios,
            active_discounts,
            active_raffle_participants,
        })
    }
}

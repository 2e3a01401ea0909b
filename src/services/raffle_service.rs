use std::sync::Arc;
use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{
    comercio_entity as comercios, participant_entity as participants, prize_entity as prizes,
    raffle_entity as raffles,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePrizeRequest, CreateRaffleRequest, PaginatedResponse, PaginationParams,
    ParticipantAdminResponse, ParticipantQuery, PrizeResponse, PublicPrizeResponse,
    PublicRaffleResponse, PublicWinnerResponse, RaffleResponse, UpdatePrizeRequest,
    UpdateRaffleRequest,
};
use crate::utils::{initials, mask_phone};

#[derive(Clone)]
pub struct RaffleService {
    pool: Arc<DatabaseConnection>,
}

impl RaffleService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    // -----------------------------
    // Panel: sorteos
    // -----------------------------

    /// Sorteos con su cantidad de participaciones, más recientes primero.
    pub async fn list_admin(&self) -> AppResult<Vec<RaffleResponse>> {
        let rows = raffles::Entity::find()
            .order_by_desc(raffles::Column::CreatedAt)
            .order_by_desc(raffles::Column::Id)
            .all(self.pool.as_ref())
            .await?;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct RaffleCount {
            raffle_id: i64,
            count: i64,
        }

        let counts: HashMap<i64, i64> = participants::Entity::find()
            .select_only()
            .column(participants::Column::RaffleId)
            .column_as(participants::Column::Id.count(), "count")
            .group_by(participants::Column::RaffleId)
            .into_model::<RaffleCount>()
            .all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(|c| (c.raffle_id, c.count))
            .collect();

        Ok(rows
            .into_iter()
            .map(|r| {
                let mut response = RaffleResponse::from(r);
                response.participant_count =
                    counts.get(&response.id).copied().unwrap_or_default();
                response
            })
            .collect())
    }

    pub async fn create(&self, request: CreateRaffleRequest) -> AppResult<RaffleResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "El nombre es obligatorio".to_string(),
            ));
        }

        let inserted = raffles::ActiveModel {
            name: Set(name),
            raffle_date: Set(request.raffle_date),
            active: Set(true),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(inserted.into())
    }

    pub async fn update(
        &self,
        raffle_id: i64,
        request: UpdateRaffleRequest,
    ) -> AppResult<RaffleResponse> {
        let raffle = self.find_by_id(raffle_id).await?;

        let mut am = raffle.into_active_model();
        if let Some(v) = request.name {
            let name = v.trim().to_string();
            if name.is_empty() {
                return Err(AppError::ValidationError(
                    "El nombre es obligatorio".to_string(),
                ));
            }
            am.name = Set(name);
        }
        if let Some(v) = request.raffle_date {
            am.raffle_date = Set(Some(v));
        }
        if let Some(v) = request.active {
            am.active = Set(v);
        }
        am.updated_at = Set(Some(chrono::Utc::now()));

        let updated = am.update(self.pool.as_ref()).await?;
        Ok(updated.into())
    }

    /// Borra el sorteo; participaciones y premios caen por cascada en la
    /// base. La confirmación ("¿eliminar con todos sus participantes?") es
    /// responsabilidad del cliente.
    pub async fn delete(&self, raffle_id: i64) -> AppResult<()> {
        let raffle = self.find_by_id(raffle_id).await?;
        raffle.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    pub async fn get_admin(&self, raffle_id: i64) -> AppResult<RaffleResponse> {
        let raffle = self.find_by_id(raffle_id).await?;
        let count = participants::Entity::find()
            .filter(participants::Column::RaffleId.eq(raffle_id))
            .count(self.pool.as_ref())
            .await? as i64;

        let mut response = RaffleResponse::from(raffle);
        response.participant_count = count;
        Ok(response)
    }

    /// Participaciones de un sorteo, más recientes primero, con el nombre del
    /// comercio desde el que se anotó cada una.
    pub async fn list_participants(
        &self,
        raffle_id: i64,
        query: &ParticipantQuery,
    ) -> AppResult<PaginatedResponse<ParticipantAdminResponse>> {
        self.find_by_id(raffle_id).await?;

        let params = PaginationParams::new(query.page, query.per_page);
        let base = participants::Entity::find()
            .filter(participants::Column::RaffleId.eq(raffle_id));

        let total = base.clone().count(self.pool.as_ref()).await? as i64;

        let rows = base
            .order_by_desc(participants::Column::CreatedAt)
            .order_by_desc(participants::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(self.pool.as_ref())
            .await?;

        let comercio_names = self.comercio_names_for(&rows).await?;
        let data = rows
            .into_iter()
            .map(|p| {
                let mut response = ParticipantAdminResponse::from(p);
                response.comercio_name = comercio_names.get(&response.comercio_id).cloned();
                response
            })
            .collect();

        Ok(PaginatedResponse::new(
            data,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    // -----------------------------
    // Panel: premios
    // -----------------------------

    pub async fn list_prizes(&self, raffle_id: i64) -> AppResult<Vec<PrizeResponse>> {
        self.find_by_id(raffle_id).await?;
        let rows = self.prizes_in_order(raffle_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_prize(
        &self,
        raffle_id: i64,
        request: CreatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        self.find_by_id(raffle_id).await?;

        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "El nombre del premio es obligatorio".to_string(),
            ));
        }

        // Sin posición explícita el premio va al final
        let position = match request.position {
            Some(p) => p,
            None => {
                let last = prizes::Entity::find()
                    .filter(prizes::Column::RaffleId.eq(raffle_id))
                    .order_by_desc(prizes::Column::Position)
                    .one(self.pool.as_ref())
                    .await?;
                last.map(|p| p.position + 1).unwrap_or(1)
            }
        };

        let inserted = prizes::ActiveModel {
            raffle_id: Set(raffle_id),
            name: Set(name),
            description: Set(request.description),
            image_url: Set(request.image_url),
            position: Set(position),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(inserted.into())
    }

    pub async fn update_prize(
        &self,
        prize_id: i64,
        request: UpdatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        let prize = prizes::Entity::find_by_id(prize_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Premio no encontrado".to_string()))?;

        let mut am = prize.into_active_model();
        if let Some(v) = request.name {
            let name = v.trim().to_string();
            if name.is_empty() {
                return Err(AppError::ValidationError(
                    "El nombre del premio es obligatorio".to_string(),
                ));
            }
            am.name = Set(name);
        }
        if let Some(v) = request.description {
            am.description = Set(Some(v));
        }
        if let Some(v) = request.image_url {
            am.image_url = Set(Some(v));
        }
        if let Some(v) = request.position {
            am.position = Set(v);
        }

        let updated = am.update(self.pool.as_ref()).await?;
        Ok(updated.into())
    }

    pub async fn delete_prize(&self, prize_id: i64) -> AppResult<()> {
        let prize = prizes::Entity::find_by_id(prize_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Premio no encontrado".to_string()))?;

        prize.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    // -----------------------------
    // Sitio público
    // -----------------------------

    /// El sorteo activo con sus premios y, si ya se sorteó, el ganador de
    /// cada premio en versión protegida (iniciales + teléfono enmascarado).
    pub async fn public_active(&self) -> AppResult<PublicRaffleResponse> {
        let raffle = raffles::Entity::newest_active()
            .one(self.pool.as_ref())
            .await?
            .ok_or(AppError::NoActiveRaffle)?;

        let prize_rows = self.prizes_in_order(raffle.id).await?;

        let winner_ids: Vec<i64> = prize_rows
            .iter()
            .filter_map(|p| p.winner_participant_id)
            .collect();
        let winners: HashMap<i64, participants::Model> = if winner_ids.is_empty() {
            HashMap::new()
        } else {
            participants::Entity::find()
                .filter(participants::Column::Id.is_in(winner_ids))
                .all(self.pool.as_ref())
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        let prizes = prize_rows
            .into_iter()
            .map(|p| {
                let winner = p
                    .winner_participant_id
                    .and_then(|id| winners.get(&id))
                    .map(|w| PublicWinnerResponse {
                        initials: initials(&w.name),
                        phone_masked: mask_phone(&w.whatsapp),
                    });
                PublicPrizeResponse {
                    name: p.name,
                    description: p.description,
                    image_url: p.image_url,
                    position: p.position,
                    winner,
                }
            })
            .collect();

        Ok(PublicRaffleResponse {
            name: raffle.name,
            raffle_date: raffle.raffle_date,
            prizes,
        })
    }

    // -----------------------------
    // Helpers internos
    // -----------------------------

    async fn find_by_id(&self, raffle_id: i64) -> AppResult<raffles::Model> {
        raffles::Entity::find_by_id(raffle_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Sorteo no encontrado".to_string()))
    }

    async fn prizes_in_order(&self, raffle_id: i64) -> AppResult<Vec<prizes::Model>> {
        Ok(prizes::Entity::find()
            .filter(prizes::Column::RaffleId.eq(raffle_id))
            .order_by_asc(prizes::Column::Position)
            .order_by_asc(prizes::Column::Id)
            .all(self.pool.as_ref())
            .await?)
    }

    async fn comercio_names_for(
        &self,
        rows: &[participants::Model],
    ) -> AppResult<HashMap<i64, String>> {
        let ids: Vec<i64> = rows.iter().map(|p| p.comercio_id).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = comercios::Entity::find()
            .filter(comercios::Column::Id.is_in(ids))
            .all(self.pool.as_ref())
            .await?;

        Ok(found
            .into_iter()
            .map(|c| (c.id, c.display_name().to_string()))
            .collect())
    }
}

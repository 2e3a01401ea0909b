use std::sync::Arc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{comercio_entity as comercios, discount_entity as discounts};
use crate::error::{AppError, AppResult};
use crate::models::{CreateDiscountRequest, DiscountResponse, UpdateDiscountRequest};

#[derive(Clone)]
pub struct DiscountService {
    pool: Arc<DatabaseConnection>,
}

impl DiscountService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Todos los descuentos de un comercio (incluye inactivos: es el panel).
    pub async fn list_for_comercio(&self, comercio_id: i64) -> AppResult<Vec<DiscountResponse>> {
        self.ensure_comercio(comercio_id).await?;

        let rows = discounts::Entity::find()
            .filter(discounts::Column::ComercioId.eq(comercio_id))
            .order_by_desc(discounts::Column::Featured)
            .order_by_desc(discounts::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        comercio_id: i64,
        request: CreateDiscountRequest,
    ) -> AppResult<DiscountResponse> {
        self.ensure_comercio(comercio_id).await?;

        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError(
                "El título es obligatorio".to_string(),
            ));
        }

        let inserted = discounts::ActiveModel {
            comercio_id: Set(comercio_id),
            title: Set(title),
            description: Set(request.description),
            featured: Set(request.featured.unwrap_or(false)),
            active: Set(request.active.unwrap_or(true)),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(inserted.into())
    }

    pub async fn update(
        &self,
        discount_id: i64,
        request: UpdateDiscountRequest,
    ) -> AppResult<DiscountResponse> {
        let discount = discounts::Entity::find_by_id(discount_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Descuento no encontrado".to_string()))?;

        let mut am = discount.into_active_model();
        if let Some(v) = request.title {
            let title = v.trim().to_string();
            if title.is_empty() {
                return Err(AppError::ValidationError(
                    "El título es obligatorio".to_string(),
                ));
            }
            am.title = Set(title);
        }
        if let Some(v) = request.description {
            am.description = Set(Some(v));
        }
        if let Some(v) = request.featured {
            am.featured = Set(v);
        }
        if let Some(v) = request.active {
            am.active = Set(v);
        }
        am.updated_at = Set(Some(chrono::Utc::now()));

        let updated = am.update(self.pool.as_ref()).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, discount_id: i64) -> AppResult<()> {
        let discount = discounts::Entity::find_by_id(discount_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Descuento no encontrado".to_string()))?;

        discount.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn ensure_comercio(&self, comercio_id: i64) -> AppResult<()> {
        comercios::Entity::find_by_id(comercio_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Comercio no encontrado".to_string()))?;
        Ok(())
    }
}

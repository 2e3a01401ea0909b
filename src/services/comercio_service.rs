use std::sync::Arc;
use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{
    comercio_entity as comercios, discount_entity as discounts, member_entity as members,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminComercioResponse, CreateComercioRequest, PublicComercioDetailResponse,
    PublicComercioResponse, UpdateComercioRequest,
};
use crate::utils::generate_unique_secret_code;

/// Slug normalizado: minúsculas, espacios a guiones.
fn normalize_slug(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Clone)]
pub struct ComercioService {
    pool: Arc<DatabaseConnection>,
}

impl ComercioService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    // -----------------------------
    // Panel de administración
    // -----------------------------

    pub async fn list_admin(&self) -> AppResult<Vec<AdminComercioResponse>> {
        let rows = comercios::Entity::find()
            .order_by_desc(comercios::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;

        let member_names = self.member_names_for(&rows).await?;
        Ok(rows
            .into_iter()
            .map(|c| {
                let mut response = AdminComercioResponse::from(c);
                response.member_name = member_names.get(&response.member_id).cloned();
                response
            })
            .collect())
    }

    pub async fn get_admin(&self, comercio_id: i64) -> AppResult<AdminComercioResponse> {
        let comercio = self.find_by_id(comercio_id).await?;
        let member = members::Entity::find_by_id(comercio.member_id)
            .one(self.pool.as_ref())
            .await?;

        let mut response = AdminComercioResponse::from(comercio);
        response.member_name = member.map(|m| m.display_name().to_string());
        Ok(response)
    }

    pub async fn create(&self, request: CreateComercioRequest) -> AppResult<AdminComercioResponse> {
        let slug = normalize_slug(&request.slug);
        if slug.is_empty() {
            return Err(AppError::ValidationError(
                "Socio y slug son obligatorios".to_string(),
            ));
        }

        members::Entity::find_by_id(request.member_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Socio no encontrado".to_string()))?;

        let slug_taken = comercios::Entity::find()
            .filter(comercios::Column::Slug.eq(slug.clone()))
            .one(self.pool.as_ref())
            .await?;
        if slug_taken.is_some() {
            return Err(AppError::ValidationError(
                "Ya existe un comercio con ese slug".to_string(),
            ));
        }

        let secret_code = generate_unique_secret_code(self.pool.as_ref()).await?;

        let inserted = comercios::ActiveModel {
            member_id: Set(request.member_id),
            slug: Set(slug),
            fantasy_name: Set(request.fantasy_name),
            logo_url: Set(request.logo_url),
            short_description: Set(request.short_description),
            instagram: Set(request.instagram),
            facebook: Set(request.facebook),
            website: Set(request.website),
            whatsapp: Set(request.whatsapp),
            display_address: Set(request.display_address),
            secret_code: Set(secret_code),
            active: Set(request.active.unwrap_or(true)),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(inserted.into())
    }

    pub async fn update(
        &self,
        comercio_id: i64,
        request: UpdateComercioRequest,
    ) -> AppResult<AdminComercioResponse> {
        let comercio = self.find_by_id(comercio_id).await?;

        let mut am = comercio.into_active_model();
        if let Some(v) = request.slug {
            let slug = normalize_slug(&v);
            if slug.is_empty() {
                return Err(AppError::ValidationError("El slug es obligatorio".to_string()));
            }
            am.slug = Set(slug);
        }
        if let Some(v) = request.fantasy_name {
            am.fantasy_name = Set(Some(v));
        }
        if let Some(v) = request.logo_url {
            am.logo_url = Set(Some(v));
        }
        if let Some(v) = request.short_description {
            am.short_description = Set(Some(v));
        }
        if let Some(v) = request.instagram {
            am.instagram = Set(Some(v));
        }
        if let Some(v) = request.facebook {
            am.facebook = Set(Some(v));
        }
        if let Some(v) = request.website {
            am.website = Set(Some(v));
        }
        if let Some(v) = request.whatsapp {
            am.whatsapp = Set(Some(v));
        }
        if let Some(v) = request.display_address {
            am.display_address = Set(Some(v));
        }
        if let Some(v) = request.active {
            am.active = Set(v);
        }
        am.updated_at = Set(Some(chrono::Utc::now()));

        let updated = am.update(self.pool.as_ref()).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, comercio_id: i64) -> AppResult<()> {
        let comercio = self.find_by_id(comercio_id).await?;
        comercio.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    /// Rota el token del comercio. Los carteles ya impresos quedan inválidos.
    pub async fn regenerate_code(&self, comercio_id: i64) -> AppResult<AdminComercioResponse> {
        let comercio = self.find_by_id(comercio_id).await?;

        let new_code = generate_unique_secret_code(self.pool.as_ref()).await?;
        let mut am = comercio.into_active_model();
        am.secret_code = Set(new_code);
        am.updated_at = Set(Some(chrono::Utc::now()));

        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Secret code rotated for comercio {comercio_id}");
        Ok(updated.into())
    }

    /// (nombre, secret_code) de todos los comercios activos, para los carteles.
    pub async fn cartel_targets(&self) -> AppResult<Vec<(String, String)>> {
        let rows = comercios::Entity::find()
            .filter(comercios::Column::Active.eq(true))
            .order_by_asc(comercios::Column::FantasyName)
            .all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|c| (c.display_name().to_string(), c.secret_code))
            .collect())
    }

    pub async fn cartel_target(&self, comercio_id: i64) -> AppResult<(String, String)> {
        let comercio = self.find_by_id(comercio_id).await?;
        Ok((comercio.display_name().to_string(), comercio.secret_code))
    }

    // -----------------------------
    // Sitio público
    // -----------------------------

    pub async fn list_public(&self) -> AppResult<Vec<PublicComercioResponse>> {
        let rows = comercios::Entity::find()
            .filter(comercios::Column::Active.eq(true))
            .order_by_asc(comercios::Column::FantasyName)
            .all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Perfil público por slug, con los descuentos vigentes (destacados
    /// primero). Un comercio inactivo no existe para el público.
    pub async fn get_public_by_slug(&self, slug: &str) -> AppResult<PublicComercioDetailResponse> {
        let comercio = comercios::Entity::find()
            .filter(comercios::Column::Slug.eq(slug))
            .filter(comercios::Column::Active.eq(true))
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Comercio no encontrado.".to_string()))?;

        let discount_rows = discounts::Entity::find()
            .filter(discounts::Column::ComercioId.eq(comercio.id))
            .filter(discounts::Column::Active.eq(true))
            .order_by_desc(discounts::Column::Featured)
            .order_by_asc(discounts::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;

        let name = comercio.display_name().to_string();
        Ok(PublicComercioDetailResponse {
            slug: comercio.slug,
            name,
            logo_url: comercio.logo_url,
            short_description: comercio.short_description,
            instagram: comercio.instagram,
            facebook: comercio.facebook,
            website: comercio.website,
            whatsapp: comercio.whatsapp,
            display_address: comercio.display_address,
            discounts: discount_rows.into_iter().map(Into::into).collect(),
        })
    }

    // -----------------------------
    // Helpers internos
    // -----------------------------

    async fn find_by_id(&self, comercio_id: i64) -> AppResult<comercios::Model> {
        comercios::Entity::find_by_id(comercio_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Comercio no encontrado".to_string()))
    }

    async fn member_names_for(
        &self,
        rows: &[comercios::Model],
    ) -> AppResult<HashMap<i64, String>> {
        let ids: Vec<i64> = rows.iter().map(|c| c.member_id).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = members::Entity::find()
            .filter(members::Column::Id.is_in(ids))
            .all(self.pool.as_ref())
            .await?;

        Ok(found
            .into_iter()
            .map(|m| (m.id, m.display_name().to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("Mi Tienda"), "mi-tienda");
        assert_eq!(normalize_slug("  Ferox   SRL  "), "ferox-srl");
        assert_eq!(normalize_slug("ya-normalizado"), "ya-normalizado");
        assert_eq!(normalize_slug("   "), "");
    }
}

use std::sync::Arc;
use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{member_entity as members, segment_entity as segments};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateMemberRequest, CreateSegmentRequest, MemberPageResponse, MemberQuery, MemberResponse,
    PaginatedResponse, PaginationParams, SegmentResponse, UpdateMemberRequest,
};

#[derive(Clone)]
pub struct MemberService {
    pool: Arc<DatabaseConnection>,
}

impl MemberService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Listado paginado del padrón, con búsqueda por nombre o número de socio.
    pub async fn list(&self, query: &MemberQuery) -> AppResult<MemberPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base = members::Entity::find();
        if let Some(search) = query.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                base = base.filter(
                    Condition::any()
                        .add(members::Column::BusinessName.contains(search))
                        .add(members::Column::TradeName.contains(search))
                        .add(members::Column::MemberNumber.contains(search)),
                );
            }
        }

        let total = base.clone().count(self.pool.as_ref()).await? as i64;

        let rows = base
            .order_by_desc(members::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(self.pool.as_ref())
            .await?;

        let segment_names = self.segment_names_for(&rows).await?;
        let data = rows
            .into_iter()
            .map(|m| {
                let mut response = MemberResponse::from(m);
                response.segment_name = response
                    .segment_id
                    .and_then(|id| segment_names.get(&id).cloned());
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

    pub async fn create(&self, request: CreateMemberRequest) -> AppResult<MemberResponse> {
        let member_number = request.member_number.trim().to_string();
        if member_number.is_empty() {
            return Err(AppError::ValidationError(
                "El número de socio es obligatorio".to_string(),
            ));
        }

        let taken = members::Entity::find()
            .filter(members::Column::MemberNumber.eq(member_number.clone()))
            .one(self.pool.as_ref())
            .await?;
        if taken.is_some() {
            return Err(AppError::ValidationError(
                "Ya existe un socio con ese número".to_string(),
            ));
        }

        let inserted = members::ActiveModel {
            member_number: Set(member_number),
            business_name: Set(request.business_name),
            trade_name: Set(request.trade_name),
            legal_form: Set(request.legal_form),
            tax_id: Set(request.tax_id),
            member_type: Set(request.member_type),
            payment_method: Set(request.payment_method),
            monthly_fee: Set(request.monthly_fee),
            fee_up_to_date: Set(request.fee_up_to_date.unwrap_or(false)),
            street: Set(request.street),
            street_number: Set(request.street_number),
            city: Set(request.city),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            mobile_phone: Set(request.mobile_phone),
            email: Set(request.email),
            segment_id: Set(request.segment_id),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(inserted.into())
    }

    pub async fn update(
        &self,
        member_id: i64,
        request: UpdateMemberRequest,
    ) -> AppResult<MemberResponse> {
        let member = members::Entity::find_by_id(member_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Socio no encontrado".to_string()))?;

        let mut am = member.into_active_model();
        if let Some(v) = request.member_number {
            am.member_number = Set(v.trim().to_string());
        }
        if let Some(v) = request.business_name {
            am.business_name = Set(Some(v));
        }
        if let Some(v) = request.trade_name {
            am.trade_name = Set(Some(v));
        }
        if let Some(v) = request.legal_form {
            am.legal_form = Set(Some(v));
        }
        if let Some(v) = request.tax_id {
            am.tax_id = Set(Some(v));
        }
        if let Some(v) = request.member_type {
            am.member_type = Set(Some(v));
        }
        if let Some(v) = request.payment_method {
            am.payment_method = Set(Some(v));
        }
        if let Some(v) = request.monthly_fee {
            am.monthly_fee = Set(Some(v));
        }
        if let Some(v) = request.fee_up_to_date {
            am.fee_up_to_date = Set(v);
        }
        if let Some(v) = request.street {
            am.street = Set(Some(v));
        }
        if let Some(v) = request.street_number {
            am.street_number = Set(Some(v));
        }
        if let Some(v) = request.city {
            am.city = Set(Some(v));
        }
        if let Some(v) = request.first_name {
            am.first_name = Set(Some(v));
        }
        if let Some(v) = request.last_name {
            am.last_name = Set(Some(v));
        }
        if let Some(v) = request.mobile_phone {
            am.mobile_phone = Set(Some(v));
        }
        if let Some(v) = request.email {
            am.email = Set(Some(v));
        }
        if let Some(v) = request.segment_id {
            am.segment_id = Set(Some(v));
        }
        am.updated_at = Set(Some(chrono::Utc::now()));

        let updated = am.update(self.pool.as_ref()).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, member_id: i64) -> AppResult<()> {
        let member = members::Entity::find_by_id(member_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Socio no encontrado".to_string()))?;

        member.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    pub async fn list_segments(&self) -> AppResult<Vec<SegmentResponse>> {
        let rows = segments::Entity::find()
            .order_by_asc(segments::Column::Name)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_segment(&self, request: CreateSegmentRequest) -> AppResult<SegmentResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "El nombre del rubro es obligatorio".to_string(),
            ));
        }

        let inserted = segments::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(inserted.into())
    }

    // -----------------------------
    // Helpers internos
    // -----------------------------

    async fn segment_names_for(
        &self,
        rows: &[members::Model],
    ) -> AppResult<HashMap<i64, String>> {
        let ids: Vec<i64> = rows.iter().filter_map(|m| m.segment_id).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = segments::Entity::find()
            .filter(segments::Column::Id.is_in(ids))
            .all(self.pool.as_ref())
            .await?;

        Ok(found.into_iter().map(|s| (s.id, s.name)).collect())
    }
}

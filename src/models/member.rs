use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{member_entity as members, segment_entity as segments};

/// Parámetros de listado de socios
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MemberQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Busca en razón social, nombre de fantasía y número de socio
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMemberRequest {
    #[schema(example = "00123")]
    pub member_number: String,
    pub business_name: Option<String>,
    pub trade_name: Option<String>,
    pub legal_form: Option<String>,
    pub tax_id: Option<String>,
    pub member_type: Option<String>,
    pub payment_method: Option<String>,
    pub monthly_fee: Option<i64>,
    pub fee_up_to_date: Option<bool>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub city: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
    pub segment_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMemberRequest {
    pub member_number: Option<String>,
    pub business_name: Option<String>,
    pub trade_name: Option<String>,
    pub legal_form: Option<String>,
    pub tax_id: Option<String>,
    pub member_type: Option<String>,
    pub payment_method: Option<String>,
    pub monthly_fee: Option<i64>,
    pub fee_up_to_date: Option<bool>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub city: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
    pub segment_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: i64,
    pub member_number: String,
    pub business_name: Option<String>,
    pub trade_name: Option<String>,
    pub legal_form: Option<String>,
    pub tax_id: Option<String>,
    pub member_type: Option<String>,
    pub payment_method: Option<String>,
    pub monthly_fee: Option<i64>,
    pub fee_up_to_date: bool,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub city: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
    pub segment_id: Option<i64>,
    /// Nombre del rubro, resuelto aparte del modelo
    pub segment_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<members::Model> for MemberResponse {
    fn from(m: members::Model) -> Self {
        MemberResponse {
            id: m.id,
            member_number: m.member_number,
            business_name: m.business_name,
            trade_name: m.trade_name,
            legal_form: m.legal_form,
            tax_id: m.tax_id,
            member_type: m.member_type,
            payment_method: m.payment_method,
            monthly_fee: m.monthly_fee,
            fee_up_to_date: m.fee_up_to_date,
            street: m.street,
            street_number: m.street_number,
            city: m.city,
            first_name: m.first_name,
            last_name: m.last_name,
            mobile_phone: m.mobile_phone,
            email: m.email,
            segment_id: m.segment_id,
            segment_name: None,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SegmentResponse {
    pub id: i64,
    pub name: String,
}

impl From<segments::Model> for SegmentResponse {
    fn from(m: segments::Model) -> Self {
        SegmentResponse {
            id: m.id,
            name: m.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSegmentRequest {
    #[schema(example = "Gastronomía")]
    pub name: String,
}

/// Listado paginado de socios
pub type MemberPageResponse = super::PaginatedResponse<MemberResponse>;

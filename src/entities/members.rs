use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Socio del centro comercial.
/// Los datos societarios/fiscales son opcionales: el padrón histórico vino
/// incompleto y se completa de a poco desde el panel.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Número de socio (único)
    pub member_number: String,
    pub business_name: Option<String>,
    pub trade_name: Option<String>,
    pub legal_form: Option<String>,
    pub tax_id: Option<String>,
    pub member_type: Option<String>,
    pub payment_method: Option<String>,
    /// Cuota mensual en pesos
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
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Nombre para listados: fantasía si hay, si no la razón social.
    pub fn display_name(&self) -> &str {
        self.trade_name
            .as_deref()
            .or(self.business_name.as_deref())
            .unwrap_or(&self.member_number)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

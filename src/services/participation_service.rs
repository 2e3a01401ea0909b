use std::sync::Arc;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::artifacts::TalonData;
use crate::entities::{
    comercio_entity as comercios, participant_entity as participants, raffle_entity as raffles,
};
use crate::error::{AppError, AppResult};
use crate::models::{ParticipateRequest, ParticipateResponse, ParticipationContextResponse};
use crate::utils::{is_participation_allowed, today_in_uruguay, validate_phone, TicketNumber};

/// Par (comercio, sorteo) ya resuelto y dentro de la ventana del evento.
#[derive(Debug)]
pub struct EligibleEntry {
    pub comercio: comercios::Model,
    pub raffle: raffles::Model,
}

#[derive(Clone)]
pub struct ParticipationService {
    pool: Arc<DatabaseConnection>,
}

impl ParticipationService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { pool: pool.into() }
    }

    /// Resuelve el código para pintar el formulario. La misma verificación se
    /// repite al enviar: una pestaña abierta puede cruzar la medianoche.
    pub async fn resolve(&self, code: &str) -> AppResult<ParticipationContextResponse> {
        let entry = self.resolve_on(code, today_in_uruguay()).await?;
        Ok(ParticipationContextResponse {
            comercio_name: entry.comercio.display_name().to_string(),
            comercio_slug: entry.comercio.slug,
            raffle_name: entry.raffle.name,
        })
    }

    /// Registra una participación:
    /// 1. Validación local de nombre y teléfono (sin tocar la base)
    /// 2. Reevaluación de elegibilidad (código, sorteo activo, día del evento)
    /// 3. INSERT directo: el índice único decide si es duplicado. Nada de
    ///    SELECT previo (correría contra otro submit) ni de reintentos.
    pub async fn submit(&self, request: ParticipateRequest) -> AppResult<ParticipateResponse> {
        self.submit_on(request, today_in_uruguay()).await
    }

    async fn submit_on(
        &self,
        request: ParticipateRequest,
        today: NaiveDate,
    ) -> AppResult<ParticipateResponse> {
        let name = request.name.trim().to_string();
        if name.chars().count() < 3 {
            return Err(AppError::NameTooShort);
        }
        let whatsapp = validate_phone(&request.whatsapp)?;

        let entry = self.resolve_on(&request.code, today).await?;

        let inserted = participants::ActiveModel {
            raffle_id: Set(entry.raffle.id),
            comercio_id: Set(entry.comercio.id),
            name: Set(name),
            whatsapp: Set(whatsapp),
            // ticket_number lo completa el trigger de la base
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await;

        match inserted {
            Ok(model) => Ok(ParticipateResponse {
                ticket_number: TicketNumber::from(model.ticket_number),
            }),
            Err(err) => Err(Self::map_insert_error(err)),
        }
    }

    pub(crate) async fn resolve_on(&self, code: &str, today: NaiveDate) -> AppResult<EligibleEntry> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::InvalidCode);
        }

        let comercio = comercios::Entity::find()
            .filter(comercios::Column::SecretCode.eq(code))
            .filter(comercios::Column::Active.eq(true))
            .one(self.pool.as_ref())
            .await?
            .ok_or(AppError::InvalidCode)?;

        let raffle = raffles::Entity::newest_active()
            .one(self.pool.as_ref())
            .await?
            .ok_or(AppError::NoActiveRaffle)?;

        if !is_participation_allowed(raffle.raffle_date, today) {
            return Err(AppError::OutsideParticipationWindow);
        }

        Ok(EligibleEntry { comercio, raffle })
    }

    /// La violación de unicidad ES la señal de duplicado. Cualquier otra
    /// falla es un error genérico reintentable; reintentar un duplicado solo
    /// volvería a chocar contra el mismo índice.
    fn map_insert_error(err: sea_orm::DbErr) -> AppError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateParticipation,
            _ => {
                log::error!("Participation insert failed: {err}");
                AppError::SubmissionFailed
            }
        }
    }

    /// Datos del talón de un participante ya registrado. El código del
    /// comercio sigue funcionando como autorización, pero acá no se aplica la
    /// ventana de fecha: un talón emitido tiene que poder reimprimirse.
    pub async fn talon_data(&self, code: &str, ticket: &TicketNumber) -> AppResult<TalonData> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::InvalidCode);
        }

        let comercio = comercios::Entity::find()
            .filter(comercios::Column::SecretCode.eq(code))
            .filter(comercios::Column::Active.eq(true))
            .one(self.pool.as_ref())
            .await?
            .ok_or(AppError::InvalidCode)?;

        let raffle = raffles::Entity::newest_active()
            .one(self.pool.as_ref())
            .await?
            .ok_or(AppError::NoActiveRaffle)?;

        let ticket_number = match ticket {
            TicketNumber::Number(n) => *n as i32,
            TicketNumber::Text(_) => {
                return Err(AppError::NotFound(
                    "Participación no encontrada.".to_string(),
                ))
            }
        };

        let participant = participants::Entity::find()
            .filter(participants::Column::RaffleId.eq(raffle.id))
            .filter(participants::Column::ComercioId.eq(comercio.id))
            .filter(participants::Column::TicketNumber.eq(ticket_number))
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Participación no encontrada.".to_string()))?;

        Ok(TalonData {
            raffle_name: raffle.name,
            comercio_name: comercio.display_name().to_string(),
            ticket: TicketNumber::from(participant.ticket_number),
            participant_name: participant.name,
            participant_phone: participant.whatsapp,
            submitted_at: participant.created_at.unwrap_or_else(chrono::Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn ferox(active: bool) -> comercios::Model {
        comercios::Model {
            id: 1,
            member_id: 10,
            slug: "ferox-srl".to_string(),
            fantasy_name: Some("Ferox SRL".to_string()),
            logo_url: None,
            short_description: None,
            instagram: None,
            facebook: None,
            website: None,
            whatsapp: None,
            display_address: None,
            secret_code: "FEROXCODE123".to_string(),
            active,
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    fn sorteo_marzo(raffle_date: Option<NaiveDate>) -> raffles::Model {
        raffles::Model {
            id: 5,
            name: "Sorteo Marzo 2026".to_string(),
            raffle_date,
            active: true,
            ticket_seq: 0,
            created_at: Some(Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn service(db: MockDatabase) -> ParticipationService {
        ParticipationService::new(db.into_connection())
    }

    #[tokio::test]
    async fn test_resolve_happy_path() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ferox(true)]])
            .append_query_results([vec![sorteo_marzo(Some(today()))]]);

        let entry = service(db)
            .resolve_on("FEROXCODE123", today())
            .await
            .unwrap();
        assert_eq!(entry.comercio.display_name(), "Ferox SRL");
        assert_eq!(entry.raffle.name, "Sorteo Marzo 2026");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_invalid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<comercios::Model>::new()]);

        let err = service(db).resolve_on("NADA", today()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCode));
    }

    #[tokio::test]
    async fn test_resolve_empty_code_short_circuits() {
        // Sin consultas encoladas: el mock fallaría si se tocara la base
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let err = service(db).resolve_on("   ", today()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCode));
    }

    #[tokio::test]
    async fn test_resolve_without_active_raffle() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ferox(true)]])
            .append_query_results([Vec::<raffles::Model>::new()]);

        let err = service(db)
            .resolve_on("FEROXCODE123", today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoActiveRaffle));
    }

    #[tokio::test]
    async fn test_resolve_outside_window() {
        // Sorteo fechado un día después de "hoy"
        let event = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ferox(true)]])
            .append_query_results([vec![sorteo_marzo(Some(event))]]);

        let err = service(db)
            .resolve_on("FEROXCODE123", today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OutsideParticipationWindow));
    }

    #[tokio::test]
    async fn test_resolve_raffle_without_date_is_closed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ferox(true)]])
            .append_query_results([vec![sorteo_marzo(None)]]);

        let err = service(db)
            .resolve_on("FEROXCODE123", today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OutsideParticipationWindow));
    }

    #[tokio::test]
    async fn test_submit_rejects_short_name_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let err = service(db)
            .submit_on(
                ParticipateRequest {
                    code: "FEROXCODE123".to_string(),
                    name: "  Jo ".to_string(),
                    whatsapp: "09 123 456".to_string(),
                },
                today(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NameTooShort));
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_phone_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);
        let err = service(db)
            .submit_on(
                ParticipateRequest {
                    code: "FEROXCODE123".to_string(),
                    name: "Juan Pérez".to_string(),
                    whatsapp: "123".to_string(),
                },
                today(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPhone));
    }

    #[test]
    fn test_generic_insert_failure_maps_to_submission_failed() {
        let err = ParticipationService::map_insert_error(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, AppError::SubmissionFailed));
    }
}

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Name too short")]
    NameTooShort,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid or inactive merchant code")]
    InvalidCode,

    #[error("No active raffle")]
    NoActiveRaffle,

    #[error("Outside participation window")]
    OutsideParticipationWindow,

    #[error("Duplicate participation")]
    DuplicateParticipation,

    #[error("Submission failed")]
    SubmissionFailed,

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::NameTooShort => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "NAME_TOO_SHORT",
                "El nombre debe tener al menos 3 caracteres.".to_string(),
            ),
            AppError::InvalidPhone => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_PHONE",
                "El número de WhatsApp no es válido.".to_string(),
            ),
            AppError::InvalidCode => {
                log::warn!("Participation attempt with invalid or inactive code");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "INVALID_CODE",
                    "Comercio no válido.".to_string(),
                )
            }
            AppError::NoActiveRaffle => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "NO_ACTIVE_RAFFLE",
                "No hay sorteo activo.".to_string(),
            ),
            AppError::OutsideParticipationWindow => (
                actix_web::http::StatusCode::FORBIDDEN,
                "OUTSIDE_PARTICIPATION_WINDOW",
                "La participación está habilitada solo el Día de las Piedras (fecha del evento)."
                    .to_string(),
            ),
            AppError::DuplicateParticipation => (
                actix_web::http::StatusCode::CONFLICT,
                "DUPLICATE_PARTICIPATION",
                "Este número ya participó en este sorteo desde este comercio. \
                 Visitá otro comercio adherido para sumar otra participación."
                    .to_string(),
            ),
            AppError::SubmissionFailed => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "SUBMISSION_FAILED",
                "Error al registrar participación. Intenta nuevamente.".to_string(),
            ),
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    "Token inválido o expirado.".to_string(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Error interno.".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                log::error!("Internal error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Error inesperado.".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}

use crate::artifacts::build_talon_pdf;
use crate::config::AppConfig;
use crate::models::*;
use crate::services::ParticipationService;
use crate::utils::{talon_filename, TicketNumber};
use actix_web::http::header;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/participar",
    tag = "participar",
    params(
        ("code" = String, Query, description = "Código secreto del comercio")
    ),
    responses(
        (status = 200, description = "Código válido, datos para el formulario", body = ParticipationContextResponse),
        (status = 400, description = "Comercio no válido o sin sorteo activo"),
        (status = 403, description = "Fuera de la ventana de participación")
    )
)]
/// Resuelve el código del cartel: comercio activo + sorteo activo + ventana
/// del día del evento. El frontend saca el code de la URL apenas lo lee.
pub async fn resolve(
    service: web::Data<ParticipationService>,
    query: web::Query<ResolveQuery>,
) -> Result<HttpResponse> {
    match service.resolve(&query.code).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participar",
    tag = "participar",
    request_body = ParticipateRequest,
    responses(
        (status = 200, description = "Participación registrada", body = ParticipateResponse),
        (status = 400, description = "Datos inválidos, código inválido o sin sorteo activo"),
        (status = 403, description = "Fuera de la ventana de participación"),
        (status = 409, description = "Ese teléfono ya participó desde este comercio"),
        (status = 500, description = "Falla al registrar, se puede reintentar")
    )
)]
/// Registra una participación. Sin autenticación: el código del comercio es
/// la autorización, y el índice único (sorteo, comercio, teléfono) el único
/// control anti-abuso.
pub async fn participate(
    service: web::Data<ParticipationService>,
    request: web::Json<ParticipateRequest>,
) -> Result<HttpResponse> {
    match service.submit(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participar/talon",
    tag = "participar",
    params(
        ("code" = String, Query, description = "Código secreto del comercio"),
        ("ticket" = String, Query, description = "Número de talón recibido al participar")
    ),
    responses(
        (status = 200, description = "Talón en PDF descargable"),
        (status = 400, description = "Comercio no válido"),
        (status = 404, description = "Participación no encontrada")
    )
)]
/// Talón de participación en PDF, con nombre de archivo determinista
/// `talon-participacion-<numero>.pdf`.
pub async fn download_talon(
    service: web::Data<ParticipationService>,
    app_config: web::Data<AppConfig>,
    query: web::Query<TalonQuery>,
) -> Result<HttpResponse> {
    let ticket = TicketNumber::parse(&query.ticket);

    let data = match service.talon_data(&query.code, &ticket).await {
        Ok(data) => data,
        Err(e) => return Ok(e.error_response()),
    };

    // El fondo es opcional; si el archivo no está se dibuja el talón clásico
    let background = match app_config.talon_background.as_deref() {
        Some(path) => tokio::fs::read(path).await.ok(),
        None => None,
    };

    match build_talon_pdf(&data, background.as_deref()) {
        Ok(bytes) => {
            let filename = talon_filename(&data.ticket);
            Ok(HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(bytes))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn participation_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participar")
            .service(
                web::resource("")
                    .route(web::get().to(resolve))
                    .route(web::post().to(participate)),
            )
            .route("/talon", web::get().to(download_talon)),
    );
}

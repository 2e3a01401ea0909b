use crate::models::*;
use crate::services::RaffleService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

// -----------------------------
// Sitio público
// -----------------------------

#[utoipa::path(
    get,
    path = "/sorteos/activo",
    tag = "sorteos",
    responses(
        (status = 200, description = "Sorteo activo con premios y ganadores enmascarados", body = PublicRaffleResponse),
        (status = 400, description = "No hay sorteo activo")
    )
)]
pub async fn active_raffle(service: web::Data<RaffleService>) -> Result<HttpResponse> {
    match service.public_active().await {
        Ok(raffle) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": raffle }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn raffle_public_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/sorteos").route("/activo", web::get().to(active_raffle)));
}

// -----------------------------
// Panel: sorteos
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/sorteos",
    tag = "admin_sorteos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sorteos con cantidad de participaciones", body = [RaffleResponse]),
        (status = 401, description = "No autorizado")
    )
)]
pub async fn list(service: web::Data<RaffleService>) -> Result<HttpResponse> {
    match service.list_admin().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/sorteos",
    tag = "admin_sorteos",
    security(("bearer_auth" = [])),
    request_body = CreateRaffleRequest,
    responses(
        (status = 200, description = "Sorteo creado (queda activo)", body = RaffleResponse),
        (status = 400, description = "Nombre vacío")
    )
)]
pub async fn create(
    service: web::Data<RaffleService>,
    request: web::Json<CreateRaffleRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(created) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": created }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/sorteos/{id}",
    tag = "admin_sorteos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Detalle del sorteo", body = RaffleResponse),
        (status = 404, description = "Sorteo no encontrado")
    )
)]
pub async fn get(service: web::Data<RaffleService>, path: web::Path<i64>) -> Result<HttpResponse> {
    match service.get_admin(path.into_inner()).await {
        Ok(raffle) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": raffle }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/sorteos/{id}",
    tag = "admin_sorteos",
    security(("bearer_auth" = [])),
    request_body = UpdateRaffleRequest,
    responses(
        (status = 200, description = "Sorteo actualizado", body = RaffleResponse),
        (status = 404, description = "Sorteo no encontrado")
    )
)]
pub async fn update(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
    request: web::Json<UpdateRaffleRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": updated }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/sorteos/{id}",
    tag = "admin_sorteos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sorteo eliminado junto con sus participaciones"),
        (status = 404, description = "Sorteo no encontrado")
    )
)]
pub async fn delete(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/sorteos/{id}/participantes",
    tag = "admin_sorteos",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Página (por defecto 1)"),
        ("per_page" = Option<u32>, Query, description = "Tamaño de página (por defecto 20)")
    ),
    responses(
        (status = 200, description = "Participaciones del sorteo, más recientes primero"),
        (status = 404, description = "Sorteo no encontrado")
    )
)]
pub async fn list_participants(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
    query: web::Query<ParticipantQuery>,
) -> Result<HttpResponse> {
    match service
        .list_participants(path.into_inner(), &query.into_inner())
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

// -----------------------------
// Panel: premios
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/sorteos/{id}/premios",
    tag = "admin_premios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Premios del sorteo en orden", body = [PrizeResponse]),
        (status = 404, description = "Sorteo no encontrado")
    )
)]
pub async fn list_prizes(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_prizes(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/sorteos/{id}/premios",
    tag = "admin_premios",
    security(("bearer_auth" = [])),
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "Premio creado (sin posición va al final)", body = PrizeResponse),
        (status = 404, description = "Sorteo no encontrado")
    )
)]
pub async fn create_prize(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
    request: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .create_prize(path.into_inner(), request.into_inner())
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": created }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/premios/{id}",
    tag = "admin_premios",
    security(("bearer_auth" = [])),
    request_body = UpdatePrizeRequest,
    responses(
        (status = 200, description = "Premio actualizado", body = PrizeResponse),
        (status = 404, description = "Premio no encontrado")
    )
)]
pub async fn update_prize(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .update_prize(path.into_inner(), request.into_inner())
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": updated }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/premios/{id}",
    tag = "admin_premios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Premio eliminado"),
        (status = 404, description = "Premio no encontrado")
    )
)]
pub async fn delete_prize(
    service: web::Data<RaffleService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_prize(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn raffle_admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sorteos")
            .service(
                web::resource("")
                    .route(web::get().to(list))
                    .route(web::post().to(create)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get))
                    .route(web::put().to(update))
                    .route(web::delete().to(delete)),
            )
            .route("/{id}/participantes", web::get().to(list_participants))
            .service(
                web::resource("/{id}/premios")
                    .route(web::get().to(list_prizes))
                    .route(web::post().to(create_prize)),
            ),
    )
    .service(
        web::resource("/premios/{id}")
            .route(web::put().to(update_prize))
            .route(web::delete().to(delete_prize)),
    );
}

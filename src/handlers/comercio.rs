use crate::artifacts::{build_cartel_pdf, participation_url, qr_png, CartelSize};
use crate::config::AppConfig;
use crate::models::*;
use crate::services::ComercioService;
use actix_web::http::header;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

// -----------------------------
// Sitio público
// -----------------------------

#[utoipa::path(
    get,
    path = "/comercios",
    tag = "comercios",
    responses(
        (status = 200, description = "Directorio de comercios activos", body = [PublicComercioResponse])
    )
)]
pub async fn list_public(service: web::Data<ComercioService>) -> Result<HttpResponse> {
    match service.list_public().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/comercios/{slug}",
    tag = "comercios",
    params(
        ("slug" = String, Path, description = "Slug del comercio")
    ),
    responses(
        (status = 200, description = "Perfil del comercio con sus descuentos", body = PublicComercioDetailResponse),
        (status = 404, description = "Comercio inexistente o inactivo")
    )
)]
pub async fn get_public(
    service: web::Data<ComercioService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_public_by_slug(&path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": detail }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn comercio_public_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comercios")
            .route("", web::get().to(list_public))
            .route("/{slug}", web::get().to(get_public)),
    );
}

// -----------------------------
// Panel de administración
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/comercios",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Todos los comercios con su código", body = [AdminComercioResponse]),
        (status = 401, description = "No autorizado")
    )
)]
pub async fn list_admin(service: web::Data<ComercioService>) -> Result<HttpResponse> {
    match service.list_admin().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/comercios/{id}",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Detalle del comercio", body = AdminComercioResponse),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn get_admin(
    service: web::Data<ComercioService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_admin(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": detail }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/comercios",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    request_body = CreateComercioRequest,
    responses(
        (status = 200, description = "Comercio creado con código generado", body = AdminComercioResponse),
        (status = 400, description = "Slug duplicado o datos inválidos")
    )
)]
pub async fn create(
    service: web::Data<ComercioService>,
    request: web::Json<CreateComercioRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(created) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": created }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/comercios/{id}",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    request_body = UpdateComercioRequest,
    responses(
        (status = 200, description = "Comercio actualizado", body = AdminComercioResponse),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn update(
    service: web::Data<ComercioService>,
    path: web::Path<i64>,
    request: web::Json<UpdateComercioRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": updated }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/comercios/{id}",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comercio eliminado"),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn delete(
    service: web::Data<ComercioService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/comercios/{id}/regenerate-code",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Código rotado; los carteles viejos dejan de valer", body = AdminComercioResponse),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn regenerate_code(
    service: web::Data<ComercioService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.regenerate_code(path.into_inner()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": updated }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/comercios/{id}/cartel",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    params(
        ("size" = Option<String>, Query, description = "a5 (por defecto) o a6")
    ),
    responses(
        (status = 200, description = "Cartel QR del comercio en PDF"),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn cartel(
    service: web::Data<ComercioService>,
    app_config: web::Data<AppConfig>,
    path: web::Path<i64>,
    query: web::Query<CartelQuery>,
) -> Result<HttpResponse> {
    let size = match CartelSize::parse(query.size.as_deref()) {
        Ok(size) => size,
        Err(e) => return Ok(e.error_response()),
    };

    let comercio_id = path.into_inner();
    let target = match service.cartel_target(comercio_id).await {
        Ok(target) => target,
        Err(e) => return Ok(e.error_response()),
    };

    match build_cartel_pdf(&[target], size, &app_config.base_url) {
        Ok(bytes) => Ok(pdf_response(bytes, &format!("cartel-comercio-{comercio_id}.pdf"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/comercios/cartel",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    params(
        ("size" = Option<String>, Query, description = "a5 (por defecto) o a6")
    ),
    responses(
        (status = 200, description = "Un cartel por página para todos los comercios activos"),
        (status = 400, description = "No hay comercios activos")
    )
)]
/// La hoja de impresión masiva del panel: una página por comercio activo.
pub async fn cartel_all(
    service: web::Data<ComercioService>,
    app_config: web::Data<AppConfig>,
    query: web::Query<CartelQuery>,
) -> Result<HttpResponse> {
    let size = match CartelSize::parse(query.size.as_deref()) {
        Ok(size) => size,
        Err(e) => return Ok(e.error_response()),
    };

    let targets = match service.cartel_targets().await {
        Ok(targets) => targets,
        Err(e) => return Ok(e.error_response()),
    };

    match build_cartel_pdf(&targets, size, &app_config.base_url) {
        Ok(bytes) => Ok(pdf_response(bytes, "carteles-comercios.pdf")),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/comercios/{id}/qr.png",
    tag = "admin_comercios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "QR del link de participación en PNG"),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn qr(
    service: web::Data<ComercioService>,
    app_config: web::Data<AppConfig>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let (_, secret_code) = match service.cartel_target(path.into_inner()).await {
        Ok(target) => target,
        Err(e) => return Ok(e.error_response()),
    };

    let link = match participation_url(&app_config.base_url, &secret_code) {
        Ok(link) => link,
        Err(e) => return Ok(e.error_response()),
    };

    match qr_png(&link, 400) {
        Ok(bytes) => Ok(HttpResponse::Ok().content_type("image/png").body(bytes)),
        Err(e) => Ok(e.error_response()),
    }
}

fn pdf_response(bytes: Vec<u8>, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(bytes)
}

pub fn comercio_admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comercios")
            .service(
                web::resource("")
                    .route(web::get().to(list_admin))
                    .route(web::post().to(create)),
            )
            // antes de "/{id}" para que "cartel" no se tome como id
            .route("/cartel", web::get().to(cartel_all))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_admin))
                    .route(web::put().to(update))
                    .route(web::delete().to(delete)),
            )
            .route("/{id}/regenerate-code", web::post().to(regenerate_code))
            .route("/{id}/cartel", web::get().to(cartel))
            .route("/{id}/qr.png", web::get().to(qr)),
    );
}

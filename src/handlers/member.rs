use crate::models::*;
use crate::services::MemberService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/socios",
    tag = "admin_socios",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Página (por defecto 1)"),
        ("per_page" = Option<u32>, Query, description = "Tamaño de página (por defecto 20)"),
        ("search" = Option<String>, Query, description = "Busca por nombre o número de socio")
    ),
    responses(
        (status = 200, description = "Padrón de socios paginado"),
        (status = 401, description = "No autorizado")
    )
)]
pub async fn list(
    service: web::Data<MemberService>,
    query: web::Query<MemberQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/socios",
    tag = "admin_socios",
    security(("bearer_auth" = [])),
    request_body = CreateMemberRequest,
    responses(
        (status = 200, description = "Socio creado", body = MemberResponse),
        (status = 400, description = "Número de socio duplicado o datos inválidos")
    )
)]
pub async fn create(
    service: web::Data<MemberService>,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()).await {
        Ok(created) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": created }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/socios/{id}",
    tag = "admin_socios",
    security(("bearer_auth" = [])),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Socio actualizado", body = MemberResponse),
        (status = 404, description = "Socio no encontrado")
    )
)]
pub async fn update(
    service: web::Data<MemberService>,
    path: web::Path<i64>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": updated }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/socios/{id}",
    tag = "admin_socios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Socio eliminado"),
        (status = 404, description = "Socio no encontrado")
    )
)]
pub async fn delete(
    service: web::Data<MemberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/segmentos",
    tag = "admin_socios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rubros disponibles", body = [SegmentResponse])
    )
)]
pub async fn list_segments(service: web::Data<MemberService>) -> Result<HttpResponse> {
    match service.list_segments().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/segmentos",
    tag = "admin_socios",
    security(("bearer_auth" = [])),
    request_body = CreateSegmentRequest,
    responses(
        (status = 200, description = "Rubro creado", body = SegmentResponse),
        (status = 400, description = "Nombre vacío")
    )
)]
pub async fn create_segment(
    service: web::Data<MemberService>,
    request: web::Json<CreateSegmentRequest>,
) -> Result<HttpResponse> {
    match service.create_segment(request.into_inner()).await {
        Ok(created) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": created }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn member_admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/socios")
            .service(
                web::resource("")
                    .route(web::get().to(list))
                    .route(web::post().to(create)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update))
                    .route(web::delete().to(delete)),
            ),
    )
    .service(
        web::resource("/segmentos")
            .route(web::get().to(list_segments))
            .route(web::post().to(create_segment)),
    );
}

use crate::models::*;
use crate::services::DiscountService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/comercios/{id}/descuentos",
    tag = "admin_descuentos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Descuentos del comercio", body = [DiscountResponse]),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn list(
    service: web::Data<DiscountService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_for_comercio(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/comercios/{id}/descuentos",
    tag = "admin_descuentos",
    security(("bearer_auth" = [])),
    request_body = CreateDiscountRequest,
    responses(
        (status = 200, description = "Descuento creado", body = DiscountResponse),
        (status = 400, description = "Título vacío"),
        (status = 404, description = "Comercio no encontrado")
    )
)]
pub async fn create(
    service: web::Data<DiscountService>,
    path: web::Path<i64>,
    request: web::Json<CreateDiscountRequest>,
) -> Result<HttpResponse> {
    match service.create(path.into_inner(), request.into_inner()).await {
        Ok(created) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": created }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/descuentos/{id}",
    tag = "admin_descuentos",
    security(("bearer_auth" = [])),
    request_body = UpdateDiscountRequest,
    responses(
        (status = 200, description = "Descuento actualizado", body = DiscountResponse),
        (status = 404, description = "Descuento no encontrado")
    )
)]
pub async fn update(
    service: web::Data<DiscountService>,
    path: web::Path<i64>,
    request: web::Json<UpdateDiscountRequest>,
) -> Result<HttpResponse> {
    match service.update(path.into_inner(), request.into_inner()).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": updated }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/descuentos/{id}",
    tag = "admin_descuentos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Descuento eliminado"),
        (status = 404, description = "Descuento no encontrado")
    )
)]
pub async fn delete(
    service: web::Data<DiscountService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn discount_admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/descuentos/{id}")
            .route(web::put().to(update))
            .route(web::delete().to(delete)),
    );
    // El alta y el listado cuelgan del comercio dueño; este recurso se
    // registra antes que el scope /comercios para resolver primero
    cfg.service(
        web::resource("/comercios/{id}/descuentos")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    );
}

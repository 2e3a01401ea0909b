use crate::models::DashboardResponse;
use crate::services::DashboardService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Conteos generales del programa", body = DashboardResponse),
        (status = 401, description = "No autorizado")
    )
)]
pub async fn dashboard(service: web::Data<DashboardService>) -> Result<HttpResponse> {
    match service.summary().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": summary }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_admin_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard));
}

use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // En producción conviene restringir a los dominios del sitio
            true
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        // Headers liberados para que el preflight del panel no falle
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

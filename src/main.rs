use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Local; // timestamp de las líneas de log
use env_logger::{Env, Target};
use std::io::Write; // formatter custom de env_logger

use dialaspiedras_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{create_cors, AuthMiddleware},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // Configuración (archivo TOML + overrides de entorno)
    let config = Config::from_toml().expect("Failed to load configuration file");

    // Pool de conexiones y migraciones
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let pool = std::sync::Arc::new(pool);

    // JWT del panel
    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    // Servicios
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let member_service = MemberService::new(pool.clone());
    let comercio_service = ComercioService::new(pool.clone());
    let discount_service = DiscountService::new(pool.clone());
    let raffle_service = RaffleService::new(pool.clone());
    let participation_service = ParticipationService::new(pool.clone());
    let dashboard_service = DashboardService::new(pool.clone());

    // Admin inicial desde la configuración
    if let Err(e) = auth_service
        .ensure_bootstrap_admin(
            &config.admin.email,
            &config.admin.password,
            config.admin.display_name.as_deref(),
        )
        .await
    {
        log::error!("Failed to ensure bootstrap admin: {e:?}");
    }

    let app_config = config.app.clone();

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(member_service.clone()))
            .app_data(web::Data::new(comercio_service.clone()))
            .app_data(web::Data::new(discount_service.clone()))
            .app_data(web::Data::new(raffle_service.clone()))
            .app_data(web::Data::new(participation_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::participation_config)
                    .configure(handlers::comercio_public_config)
                    .configure(handlers::raffle_public_config)
                    .service(
                        web::scope("/admin")
                            .configure(handlers::dashboard_admin_config)
                            // descuentos antes que comercios: sus rutas
                            // /comercios/{id}/descuentos deben resolver antes
                            // que el scope /comercios
                            .configure(handlers::discount_admin_config)
                            .configure(handlers::member_admin_config)
                            .configure(handlers::comercio_admin_config)
                            .configure(handlers::raffle_admin_config),
                    ),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}

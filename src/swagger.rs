use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;
use crate::utils::TicketNumber;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::participation::resolve,
        handlers::participation::participate,
        handlers::participation::download_talon,
        handlers::comercio::list_public,
        handlers::comercio::get_public,
        handlers::comercio::list_admin,
        handlers::comercio::get_admin,
        handlers::comercio::create,
        handlers::comercio::update,
        handlers::comercio::delete,
        handlers::comercio::regenerate_code,
        handlers::comercio::cartel,
        handlers::comercio::cartel_all,
        handlers::comercio::qr,
        handlers::member::list,
        handlers::member::create,
        handlers::member::update,
        handlers::member::delete,
        handlers::member::list_segments,
        handlers::member::create_segment,
        handlers::discount::list,
        handlers::discount::create,
        handlers::discount::update,
        handlers::discount::delete,
        handlers::raffle::active_raffle,
        handlers::raffle::list,
        handlers::raffle::create,
        handlers::raffle::get,
        handlers::raffle::update,
        handlers::raffle::delete,
        handlers::raffle::list_participants,
        handlers::raffle::list_prizes,
        handlers::raffle::create_prize,
        handlers::raffle::update_prize,
        handlers::raffle::delete_prize,
        handlers::dashboard::dashboard,
    ),
    components(
        schemas(
            LoginRequest,
            RefreshTokenRequest,
            AuthResponse,
            AdminUserResponse,
            CreateMemberRequest,
            UpdateMemberRequest,
            MemberResponse,
            SegmentResponse,
            CreateSegmentRequest,
            CreateComercioRequest,
            UpdateComercioRequest,
            AdminComercioResponse,
            PublicComercioResponse,
            PublicComercioDetailResponse,
            CreateDiscountRequest,
            UpdateDiscountRequest,
            DiscountResponse,
            PublicDiscountResponse,
            CreateRaffleRequest,
            UpdateRaffleRequest,
            RaffleResponse,
            ParticipantAdminResponse,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            PrizeResponse,
            PublicWinnerResponse,
            PublicPrizeResponse,
            PublicRaffleResponse,
            DashboardResponse,
            ParticipationContextResponse,
            ParticipateRequest,
            ParticipateResponse,
            TicketNumber,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "participar", description = "Flujo público de participación en el sorteo"),
        (name = "comercios", description = "Directorio público de comercios"),
        (name = "sorteos", description = "Sorteo activo y premios"),
        (name = "auth", description = "Autenticación del panel"),
        (name = "admin", description = "Tablero del panel"),
        (name = "admin_socios", description = "Padrón de socios"),
        (name = "admin_comercios", description = "Gestión de comercios y carteles"),
        (name = "admin_descuentos", description = "Gestión de descuentos"),
        (name = "admin_sorteos", description = "Gestión de sorteos"),
        (name = "admin_premios", description = "Gestión de premios"),
    ),
    info(
        title = "Día de Las Piedras API",
        version = "1.0.0",
        description = "Directorio de comercios, descuentos y sorteo del programa Día de Las Piedras"
    ),
    servers(
        (url = "/api/v1", description = "Servidor local")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

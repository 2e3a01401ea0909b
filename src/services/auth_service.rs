use std::sync::Arc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::admin_user_entity as admin_users;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest};
use crate::utils::{hash_password, verify_password, JwtService};

#[derive(Clone)]
pub struct AuthService {
    pool: Arc<DatabaseConnection>,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: impl Into<Arc<DatabaseConnection>>, jwt_service: JwtService) -> Self {
        Self { pool: pool.into(), jwt_service }
    }

    /// Login del panel con email y contraseña.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let admin = admin_users::Entity::find()
            .filter(admin_users::Column::Email.eq(email))
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::AuthError("Credenciales inválidas".to_string()))?;

        if !verify_password(&request.password, &admin.password_hash)? {
            return Err(AppError::AuthError("Credenciales inválidas".to_string()));
        }

        self.build_auth_response(admin)
    }

    /// Renueva el par de tokens a partir de un refresh token válido.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let admin_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Token inválido".to_string()))?;

        let admin = admin_users::Entity::find_by_id(admin_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::AuthError("Usuario inexistente".to_string()))?;

        self.build_auth_response(admin)
    }

    fn build_auth_response(&self, admin: admin_users::Model) -> AppResult<AuthResponse> {
        let access_token = self
            .jwt_service
            .generate_access_token(admin.id, &admin.email)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(admin.id, &admin.email)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
            admin: admin.into(),
        })
    }

    /// Asegura el admin inicial configurado. Se llama al arrancar; si el
    /// email ya existe no toca nada (la contraseña se cambia por otro canal).
    pub async fn ensure_bootstrap_admin(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AppResult<()> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            log::warn!("Bootstrap admin not configured, skipping");
            return Ok(());
        }

        let existing = admin_users::Entity::find()
            .filter(admin_users::Column::Email.eq(email.clone()))
            .one(self.pool.as_ref())
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        admin_users::ActiveModel {
            email: Set(email.clone()),
            password_hash: Set(hash_password(password)?),
            display_name: Set(display_name.map(|s| s.to_string())),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Bootstrap admin created: {email}");
        Ok(())
    }
}

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // admin_user_id
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String, // "access" o "refresh"
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
    refresh_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expires_in: i64, refresh_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in: access_expires_in,
            refresh_token_expires_in: refresh_expires_in,
        }
    }

    pub fn generate_access_token(&self, admin_id: i64, email: &str) -> AppResult<String> {
        self.generate_token(admin_id, email, "access", self.access_token_expires_in)
    }

    pub fn generate_refresh_token(&self, admin_id: i64, email: &str) -> AppResult<String> {
        self.generate_token(admin_id, email, "refresh", self.refresh_token_expires_in)
    }

    fn generate_token(
        &self,
        admin_id: i64,
        email: &str,
        token_type: &str,
        expires_in: i64,
    ) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in);

        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != "access" {
            return Err(AppError::AuthError("Invalid access token type".to_string()));
        }

        Ok(claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != "refresh" {
            return Err(AppError::AuthError(
                "Invalid refresh token type".to_string(),
            ));
        }

        Ok(claims)
    }

    pub fn get_access_token_expires_in(&self) -> i64 {
        self.access_token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 3600, 86400)
    }

    #[test]
    fn test_access_token_roundtrip() {
        let svc = service();
        let token = svc.generate_access_token(7, "admin@test.uy").unwrap();
        let claims = svc.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "admin@test.uy");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let svc = service();
        let token = svc.generate_refresh_token(7, "admin@test.uy").unwrap();
        assert!(svc.verify_access_token(&token).is_err());
        assert!(svc.verify_refresh_token(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service().generate_access_token(7, "admin@test.uy").unwrap();
        let other = JwtService::new("otro-secreto", 3600, 86400);
        assert!(other.verify_access_token(&token).is_err());
    }
}

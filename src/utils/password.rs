use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashea la contraseña del admin
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// Verifica una contraseña contra su hash
pub fn verify_password(password: &str, hashed: &str) -> AppResult<bool> {
    verify(password, hashed)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "S0rteoAdmin!";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("otra-cosa", &hashed).unwrap());
    }
}

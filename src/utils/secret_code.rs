use crate::entities::comercio_entity as comercios;
use crate::error::AppResult;
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

const CODE_LEN: usize = 12;
// Sin 0/O ni 1/I/L: el código termina tipeado a mano cuando el QR no escanea
const CODE_CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

fn random_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARS[rng.gen_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Genera el token de participación de un comercio, verificando unicidad
/// contra la tabla.
pub async fn generate_unique_secret_code(pool: &DatabaseConnection) -> AppResult<String> {
    loop {
        let code = random_code();

        let exists = comercios::Entity::find()
            .filter(comercios::Column::SecretCode.eq(code.clone()))
            .one(pool)
            .await?;

        if exists.is_none() {
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_code_shape() {
        let code = random_code();
        assert_eq!(code.len(), CODE_LEN);
        assert!(code.bytes().all(|b| CODE_CHARS.contains(&b)));
    }

    #[test]
    fn test_random_codes_vary() {
        // Colisión posible en teoría, despreciable con 31^12
        assert_ne!(random_code(), random_code());
    }
}

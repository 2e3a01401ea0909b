use crate::error::{AppError, AppResult};
use regex::Regex;

/// Normaliza un teléfono uruguayo: deja solo dígitos y recorta el prefijo de
/// país (+598 / 00598) si vino incluido. Idempotente: normalizar un número ya
/// normalizado devuelve los mismos dígitos.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with("00598") && digits.len() > 10 {
        digits[5..].to_string()
    } else if digits.starts_with("598") && digits.len() > 9 {
        digits[3..].to_string()
    } else {
        digits
    }
}

/// Valida y normaliza: numeración móvil local, 8 o 9 dígitos tras limpiar.
pub fn validate_phone(raw: &str) -> AppResult<String> {
    let digits = normalize_phone(raw);
    let phone_regex = Regex::new(r"^\d{8,9}$").unwrap();

    if !phone_regex.is_match(&digits) {
        return Err(AppError::InvalidPhone);
    }

    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+598 99 123 456"), "99123456");
        assert_eq!(normalize_phone("00598 99 123 456"), "99123456");
        assert_eq!(normalize_phone("09 123 456"), "09123456");
        assert_eq!(normalize_phone("091-234-567"), "091234567");
        assert_eq!(normalize_phone("(091) 234 567"), "091234567");
    }

    #[test]
    fn test_normalize_phone_is_idempotent() {
        for raw in ["+598 99 123 456", "09 123 456", "091234567", "99123456"] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once);
        }
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("09 123 456").unwrap(), "09123456");
        assert_eq!(validate_phone("091 234 567").unwrap(), "091234567");
        assert_eq!(validate_phone("+598 99 123 456").unwrap(), "99123456");
        assert!(validate_phone("1234567").is_err()); // 7 dígitos
        assert!(validate_phone("0912345678").is_err()); // 10 dígitos
        assert!(validate_phone("no es un teléfono").is_err());
        assert!(validate_phone("").is_err());
    }
}

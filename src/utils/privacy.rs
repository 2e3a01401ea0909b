/// Iniciales del nombre para mostrar ganadores sin exponer identidad (máx. 3).
pub fn initials(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(3)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Enmascara un teléfono dejando visibles los últimos 4 dígitos.
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "••••".to_string();
    }
    let visible = &digits[digits.len() - 4..];
    format!("{}{}", "•".repeat(digits.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Juan Pérez"), "JP");
        assert_eq!(initials("  ana maría lópez garcía "), "AML");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("099123456"), "•••••3456");
        assert_eq!(mask_phone("09 912 34 56"), "•••••3456");
        assert_eq!(mask_phone("123"), "••••");
    }
}

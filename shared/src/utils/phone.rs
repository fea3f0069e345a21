//! Phone number utilities

/// Mask a phone number for logs, keeping the sign and the last four digits
///
/// `+972501234567` becomes `+********4567`. Inputs of four characters or
/// fewer are fully masked.
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    let (sign, hidden) = if chars[0] == '+' {
        ("+", chars.len() - 5)
    } else {
        ("", chars.len() - 4)
    };

    format!("{}{}{}", sign, "*".repeat(hidden), visible)
}

//! Identifier normalizer
//!
//! Turns a caller-supplied phone string into the canonical key used for
//! storage and delivery. The only transformation is a leading `+`; there is
//! no digit stripping and no country-code inference.

use std::fmt;

use serde::Serialize;
use sphere_shared::utils::mask_phone_number;

use crate::errors::{OtpError, OtpResult};

/// International-format sign every key starts with
pub const KEY_SIGN: char = '+';

/// Normalized phone identifier
///
/// Only [`normalize`] constructs this type, so every key starts with `+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneKey(String);

impl PhoneKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key rendered for logs, last four digits visible
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }

    /// Key under which the pending code is stored
    pub fn storage_key(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }
}

impl fmt::Display for PhoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a raw phone number into a [`PhoneKey`]
///
/// Empty and whitespace-only input is rejected. Anything else is returned
/// unchanged when it already starts with `+`, otherwise `+` is prepended.
pub fn normalize(raw: &str) -> OtpResult<PhoneKey> {
    if raw.trim().is_empty() {
        return Err(OtpError::invalid_input("phone"));
    }

    if raw.starts_with(KEY_SIGN) {
        Ok(PhoneKey(raw.to_string()))
    } else {
        Ok(PhoneKey(format!("{}{}", KEY_SIGN, raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_sign() {
        assert_eq!(normalize("972501234567").unwrap().as_str(), "+972501234567");
        assert_eq!(normalize("0501234567").unwrap().as_str(), "+0501234567");
    }

    #[test]
    fn test_signed_input_unchanged() {
        assert_eq!(normalize("+972501234567").unwrap().as_str(), "+972501234567");
    }

    #[test]
    fn test_signed_and_unsigned_share_a_key() {
        assert_eq!(
            normalize("972501234567").unwrap(),
            normalize("+972501234567").unwrap()
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["1", "+1", "0501234567", "++44", " 12 34 ", "abc", "+"];
        for input in inputs {
            let once = normalize(input).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "input {:?}", input);
            assert!(once.as_str().starts_with('+'));
        }
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        for input in ["", " ", "\t\n"] {
            assert_eq!(normalize(input), Err(OtpError::invalid_input("phone")));
        }
    }

    #[test]
    fn test_no_other_transformation() {
        // Whitespace and separators are kept as given
        assert_eq!(normalize(" 050-123").unwrap().as_str(), "+ 050-123");
    }

    #[test]
    fn test_storage_key_and_mask() {
        let key = normalize("972501234567").unwrap();
        assert_eq!(key.storage_key("otp:"), "otp:+972501234567");
        assert_eq!(key.masked(), "+********4567");
    }
}

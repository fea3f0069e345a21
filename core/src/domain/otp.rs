//! One-time code entities

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Number of digits in a code
pub const CODE_LENGTH: usize = 6;

/// Exclusive upper bound of the code space (`000000`..=`999999`)
const CODE_SPACE: u32 = 1_000_000;

/// A fixed-width decimal code
///
/// `Debug` never prints the digits and there is deliberately no `Display`;
/// use [`OtpCode::as_str`] where the value has to leave the process.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a uniformly distributed code from the OS CSPRNG
    pub fn generate() -> Self {
        let value = OsRng.gen_range(0..CODE_SPACE);
        Self(format!("{:0width$}", value, width = CODE_LENGTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against a submitted code, in constant time
    ///
    /// No numeric coercion: `"012345"` does not match `"12345"`.
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq::constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpCode({})", "*".repeat(self.0.len()))
    }
}

/// The stored record for an issued code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOtp {
    /// Normalized phone key the code was issued for
    pub phone: String,

    /// The issued code
    pub code: OtpCode,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl PendingOtp {
    pub fn new(phone: impl Into<String>, code: OtpCode, now: DateTime<Utc>, ttl_seconds: u64) -> Self {
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        let expires_at = now
            .checked_add_signed(Duration::seconds(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            phone: phone.into(),
            code,
            created_at: now,
            expires_at,
        }
    }

    /// Whether the code is past its lifetime at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

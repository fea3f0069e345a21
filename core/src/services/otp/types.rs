//! Types for OTP service results

/// Result of a successful code request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestCodeOutcome {
    /// Code stored and handed to the notifier
    Delivered {
        /// The SMS message ID from the provider
        message_id: String,
    },
    /// Code stored, delivery failed, and the degrade policy reported success
    ///
    /// The code was written to the server log for manual recovery.
    DeliveryDegraded {
        /// Why delivery failed
        reason: String,
    },
}

impl RequestCodeOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, RequestCodeOutcome::Delivered { .. })
    }
}

/// Result of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The code matched and has been consumed
    Verified,
    /// A live code exists but differs; it stays usable until expiry
    CodeMismatch,
    /// Nothing live for this phone (never issued, expired or already used)
    NoActiveCode,
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }
}

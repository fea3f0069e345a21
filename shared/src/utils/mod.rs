//! Utility functions

pub mod phone;

pub use phone::mask_phone_number;

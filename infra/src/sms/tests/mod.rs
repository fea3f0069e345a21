//! Unit tests for SMS module

mod log_sms_tests;

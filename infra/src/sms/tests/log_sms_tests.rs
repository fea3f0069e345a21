//! Tests for the logging SMS service

use sphere_core::Notifier;

use crate::sms::LogSmsService;

#[tokio::test]
async fn test_log_sms_send_success() {
    let service = LogSmsService::new();

    let message_id = service
        .send_sms("+972501234567", "Your Sphere verification code is: 123456")
        .await
        .unwrap();

    assert!(message_id.starts_with("log_"));
    assert_eq!(service.message_count(), 1);
    assert_eq!(service.provider_name(), "log");
}

#[tokio::test]
async fn test_log_sms_unique_ids() {
    let service = LogSmsService::new();

    let first = service.send_sms("+1555", "a").await.unwrap();
    let second = service.send_sms("+1555", "b").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(service.message_count(), 2);
}

#[tokio::test]
async fn test_log_sms_simulated_failure() {
    let service = LogSmsService::failing();

    let err = service.send_sms("+1555", "a").await.unwrap_err();
    assert_eq!(err, "Simulated SMS sending failure");
    assert_eq!(service.message_count(), 0);

    service.set_simulate_failure(false);
    assert!(service.send_sms("+1555", "a").await.is_ok());
}

#[tokio::test]
async fn test_clones_share_state() {
    let service = LogSmsService::new();
    let clone = service.clone();

    clone.send_sms("+1555", "a").await.unwrap();
    assert_eq!(service.message_count(), 1);

    service.set_simulate_failure(true);
    assert!(clone.send_sms("+1555", "a").await.is_err());
}

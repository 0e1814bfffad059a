use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::session::{ClientInfo, SessionRecord, DEFAULT_DEVICE_ID};

#[test]
fn test_registration_client_defaults_device() {
    let client = ClientInfo::for_registration(None, "curl/8.0");
    assert_eq!(client.device_id, DEFAULT_DEVICE_ID);

    let blank = ClientInfo::for_registration(Some("   ".to_string()), "");
    assert_eq!(blank.device_id, DEFAULT_DEVICE_ID);

    let named = ClientInfo::for_registration(Some("phone".to_string()), "");
    assert_eq!(named.device_id, "phone");
}

#[test]
fn test_record_copies_client_fields() {
    let client = ClientInfo::new("laptop", "Firefox");
    let expires_at = Utc::now() + Duration::days(1);
    let record = SessionRecord::new(Uuid::new_v4(), "tok".to_string(), &client, expires_at);

    assert_eq!(record.device_id, "laptop");
    assert_eq!(record.user_agent, "Firefox");
    assert_eq!(record.expires_at, expires_at);
    assert!(!record.is_expired());
}

#[test]
fn test_record_expiry_boundary() {
    let now = Utc::now();
    let record = SessionRecord::new(Uuid::new_v4(), "tok".to_string(), &ClientInfo::default(), now);
    assert!(record.is_expired_at(now));
    assert!(!record.is_expired_at(now - Duration::seconds(1)));
}

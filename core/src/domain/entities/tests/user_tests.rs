use crate::domain::entities::user::User;

#[test]
fn test_new_user_normalizes_email() {
    let user = User::new("  Ada  ", "  Ada@Example.COM ", "hash".to_string());
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn test_password_hash_never_serialized() {
    let user = User::new("Ada", "ada@example.com", "$2b$04$secret".to_string());
    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("secret"));
}

#[test]
fn test_each_user_gets_unique_id() {
    let a = User::new("A", "a@x.com", String::new());
    let b = User::new("A", "a@x.com", String::new());
    assert_ne!(a.id, b.id);
}

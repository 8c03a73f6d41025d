use userbase_core::model::user::{normalize_email, AGE_RANGE, MAX_NAME_CHARS};
use userbase_core::{NewUser, User, UserValidationError};

#[test]
fn new_user_trims_and_lowercases_text_fields() {
    let draft = NewUser::new("  John.Doe@Example.COM ", " John ", " DOE ", 25).unwrap();

    assert_eq!(draft.email, "john.doe@example.com");
    assert_eq!(draft.name, "john");
    assert_eq!(draft.surname, "doe");
    assert_eq!(draft.age, 25);
}

#[test]
fn new_user_rejects_bad_email_shapes() {
    for email in ["", "plain", "missing@domain", "@example.com", "a b@c.de"] {
        let err = NewUser::new(email, "a", "b", 30).unwrap_err();
        assert!(
            matches!(err, UserValidationError::InvalidEmail(_)),
            "email `{email}` should be rejected, got {err:?}"
        );
    }
}

#[test]
fn new_user_rejects_overlong_email() {
    let local = "a".repeat(95);
    let err = NewUser::new(&format!("{local}@ex.com"), "a", "b", 30).unwrap_err();
    assert!(matches!(err, UserValidationError::EmailTooLong(_)));
}

#[test]
fn new_user_rejects_blank_names() {
    let err = NewUser::new("a@b.com", "   ", "b", 30).unwrap_err();
    assert_eq!(err, UserValidationError::EmptyName);

    let err = NewUser::new("a@b.com", "a", "\t", 30).unwrap_err();
    assert_eq!(err, UserValidationError::EmptySurname);
}

#[test]
fn new_user_rejects_overlong_names() {
    let long = "x".repeat(MAX_NAME_CHARS + 1);
    let err = NewUser::new("a@b.com", &long, "b", 30).unwrap_err();
    assert!(matches!(err, UserValidationError::NameTooLong(51)));

    let err = NewUser::new("a@b.com", "a", &long, 30).unwrap_err();
    assert!(matches!(err, UserValidationError::SurnameTooLong(51)));
}

#[test]
fn age_bounds_are_inclusive() {
    assert!(NewUser::new("a@b.com", "a", "b", *AGE_RANGE.start()).is_ok());
    assert!(NewUser::new("a@b.com", "a", "b", *AGE_RANGE.end()).is_ok());

    let err = NewUser::new("a@b.com", "a", "b", 17).unwrap_err();
    assert_eq!(err, UserValidationError::AgeOutOfRange(17));

    let err = NewUser::new("a@b.com", "a", "b", 101).unwrap_err();
    assert_eq!(err, UserValidationError::AgeOutOfRange(101));
}

#[test]
fn normalize_email_agrees_with_draft_construction() {
    assert_eq!(
        normalize_email(" A@B.Com ").unwrap(),
        "a@b.com".to_string()
    );
    assert!(normalize_email("not an email").is_err());
}

#[test]
fn user_validate_rejects_non_positive_id() {
    let draft = NewUser::new("a@b.com", "a", "b", 20).unwrap();
    let user = User::from_draft(0, &draft);
    assert_eq!(
        user.validate().unwrap_err(),
        UserValidationError::NonPositiveId(0)
    );

    let user = User::from_draft(1, &draft);
    assert!(user.validate().is_ok());
}

#[test]
fn user_serialization_uses_expected_wire_fields() {
    let user = User {
        id: 7,
        email: "a@b.com".to_string(),
        name: "a".to_string(),
        surname: "b".to_string(),
        age: 20,
    };

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["email"], "a@b.com");
    assert_eq!(json["name"], "a");
    assert_eq!(json["surname"], "b");
    assert_eq!(json["age"], 20);

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, user);
}

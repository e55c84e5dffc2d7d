use sso_core::{map_user, Casing, ContactValue, UserAttributes};

fn jane() -> UserAttributes {
    UserAttributes {
        user_name: "jane@example.com".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Smith".to_string(),
        middle_name: None,
        title: Some("Engineer".to_string()),
        email: None,
        phone_number: None,
        user_type: None,
    }
}

#[test]
fn display_name_joins_first_and_last() {
    let record = map_user(&jane(), "d-1234567890");
    assert_eq!(record.display_name, "Jane Smith");
    assert_eq!(record.name.given_name, "Jane");
    assert_eq!(record.name.family_name, "Smith");
    assert_eq!(record.identity_store_id, "d-1234567890");
}

#[test]
fn display_name_keeps_whitespace_and_casing() {
    let mut attrs = jane();
    attrs.first_name = " jANE".to_string();
    let record = map_user(&attrs, "d-1");
    assert_eq!(record.display_name, " jANE Smith");
}

#[test]
fn missing_email_and_phone_are_omitted() {
    let record = map_user(&jane(), "d-1");
    assert!(record.emails.is_none());
    assert!(record.phone_numbers.is_none());

    for casing in [Casing::Create, Casing::Update] {
        let value = record.to_value(casing);
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key(&casing.key("emails")));
        assert!(!obj.contains_key(&casing.key("phoneNumbers")));
    }
}

#[test]
fn email_becomes_single_primary_entry() {
    let mut attrs = jane();
    attrs.email = Some("jane.smith@example.com".to_string());
    attrs.phone_number = Some("+1 555 0100".to_string());

    let record = map_user(&attrs, "d-1");
    assert_eq!(
        record.emails,
        Some(vec![ContactValue {
            value: "jane.smith@example.com".to_string(),
            primary: true,
        }])
    );
    assert_eq!(
        record.phone_numbers,
        Some(vec![ContactValue::primary("+1 555 0100")])
    );
}

#[test]
fn create_casing_is_pascal_case() {
    let mut attrs = jane();
    attrs.middle_name = Some("Q".to_string());
    attrs.email = Some("jane@example.com".to_string());

    let value = map_user(&attrs, "d-1").to_value(Casing::Create);
    assert_eq!(value["UserName"], "jane@example.com");
    assert_eq!(value["DisplayName"], "Jane Smith");
    assert_eq!(value["IdentityStoreId"], "d-1");
    assert_eq!(value["Title"], "Engineer");
    assert_eq!(value["Name"]["GivenName"], "Jane");
    assert_eq!(value["Name"]["MiddleName"], "Q");
    assert_eq!(value["Emails"][0]["Primary"], true);
    assert!(value.get("userName").is_none());
}

#[test]
fn update_casing_is_lower_camel() {
    let value = map_user(&jane(), "d-1").to_value(Casing::Update);
    assert_eq!(value["userName"], "jane@example.com");
    assert_eq!(value["name"]["familyName"], "Smith");
    assert!(value["name"].get("middleName").is_none());
    assert!(value.get("userType").is_none());
}

#[test]
fn same_attributes_ignores_contact_order() {
    let mut attrs = jane();
    attrs.email = Some("a@example.com".to_string());
    let requested = map_user(&attrs, "d-1");

    let mut existing = requested.clone();
    existing.emails = Some(vec![
        ContactValue {
            value: "b@example.com".to_string(),
            primary: false,
        },
        ContactValue::primary("a@example.com"),
    ]);
    let mut reordered = existing.clone();
    reordered.emails.as_mut().unwrap().reverse();

    assert!(existing.same_attributes(&reordered));
    assert!(!existing.same_attributes(&requested));
}

use serde_json::json;
use sso_core::{CoreError, LifecycleEvent, ReconciliationResult, RequestType};

fn properties(user_name: &str, title: &str) -> serde_json::Value {
    json!({
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:provider",
        "identityStoreId": "d-1234567890",
        "userAttributes": {
            "userName": user_name,
            "firstName": "Jane",
            "lastName": "Smith",
            "title": title,
        },
        "retainUserIfStackDeleted": "false",
    })
}

#[test]
fn create_event_parses() {
    let event = LifecycleEvent::from_value(json!({
        "RequestType": "Create",
        "RequestId": "req-1",
        "StackId": "stack",
        "LogicalResourceId": "Jane",
        "ResourceType": "Custom::SsoUser",
        "ResourceProperties": properties("jane@example.com", "Engineer"),
    }))
    .unwrap();

    assert_eq!(event.request_type(), RequestType::Create);
    assert_eq!(event.physical_id(), None);
    let props = event.properties();
    assert_eq!(props.user_attributes.user_name, "jane@example.com");
    assert_eq!(props.user_attributes.title.as_deref(), Some("Engineer"));
    assert!(!props.retain_user_if_stack_deleted);
}

#[test]
fn update_event_carries_old_properties() {
    let event = LifecycleEvent::from_value(json!({
        "RequestType": "Update",
        "PhysicalResourceId": "u-123",
        "ResourceProperties": properties("jane@example.com", "Manager"),
        "OldResourceProperties": properties("jane@example.com", "Engineer"),
    }))
    .unwrap();

    match event {
        LifecycleEvent::Update {
            physical_id,
            old_properties,
            properties,
        } => {
            assert_eq!(physical_id, "u-123");
            assert_eq!(old_properties.user_attributes.title.as_deref(), Some("Engineer"));
            assert_eq!(properties.user_attributes.title.as_deref(), Some("Manager"));
        }
        other => panic!("expected update, got {other:?}"),
    }
}

#[test]
fn retain_flag_accepts_strings_and_booleans() {
    let mut props = properties("jane@example.com", "Engineer");
    props["retainUserIfStackDeleted"] = json!("true");
    let event = LifecycleEvent::from_value(json!({
        "RequestType": "Delete",
        "PhysicalResourceId": "u-123",
        "ResourceProperties": props,
    }))
    .unwrap();
    assert!(event.properties().retain_user_if_stack_deleted);

    let mut props = properties("jane@example.com", "Engineer");
    props["retainUserIfStackDeleted"] = json!(true);
    let event = LifecycleEvent::from_value(json!({
        "RequestType": "Delete",
        "PhysicalResourceId": "u-123",
        "ResourceProperties": props,
    }))
    .unwrap();
    assert!(event.properties().retain_user_if_stack_deleted);
}

#[test]
fn unknown_request_type_is_unsupported() {
    let err = LifecycleEvent::from_value(json!({
        "RequestType": "Rollback",
    }))
    .unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedOperation(ref t) if t == "Rollback"));
}

#[test]
fn non_string_request_type_is_unsupported() {
    let err = LifecycleEvent::from_value(json!({"RequestType": 5})).unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedOperation(ref t) if t == "5"));

    let err = LifecycleEvent::from_value(json!({"RequestType": null})).unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedOperation(ref t) if t == "null"));
}

#[test]
fn absent_request_type_is_malformed() {
    let err = LifecycleEvent::from_value(json!({
        "ResourceProperties": properties("jane@example.com", "Engineer"),
    }))
    .unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "RequestType"));
}

#[test]
fn update_without_physical_id_is_malformed() {
    let err = LifecycleEvent::from_value(json!({
        "RequestType": "Update",
        "ResourceProperties": properties("jane@example.com", "Manager"),
        "OldResourceProperties": properties("jane@example.com", "Engineer"),
    }))
    .unwrap_err();
    assert!(matches!(err, CoreError::MissingField(ref f) if f == "PhysicalResourceId"));
}

#[test]
fn missing_identity_store_falls_back_to_default() {
    let mut props = properties("jane@example.com", "Engineer");
    props.as_object_mut().unwrap().remove("identityStoreId");
    let event = LifecycleEvent::from_value(json!({
        "RequestType": "Create",
        "ResourceProperties": props,
    }))
    .unwrap();

    let props = event.properties();
    assert_eq!(props.identity_store_id(Some("d-default")).unwrap(), "d-default");
    assert!(matches!(
        props.identity_store_id(None),
        Err(CoreError::MissingField(_))
    ));
}

#[test]
fn result_serializes_in_provider_shape() {
    let result = ReconciliationResult::for_user("u-123", "d-1234567890");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "PhysicalResourceId": "u-123",
            "Data": {
                "UserId": "u-123",
                "IdentityStoreId": "d-1234567890",
                "Arn": "arn:aws:identitystore:::user/u-123",
            },
        })
    );
}

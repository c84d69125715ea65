//! End-to-end tests for the full-record serialization transform.
//!
//! These tests exercise:
//! - null-redacted key omission and retention,
//! - ordering and type preservation for pass-through fields, and
//! - the `Serialize`/`Debug` output of the wrapper.

use serde::Serialize;
use serde_json::{json, Value};
use shroud::{BoxError, Redactable, HIDDEN_PLACEHOLDER};

#[derive(Redactable)]
struct Citizen {
    #[redact]
    ssn: String,
    name: String,
}

fn citizen() -> Citizen {
    Citizen {
        ssn: "123-45-6789".into(),
        name: "Ann".into(),
    }
}

#[test]
fn test_redacted_map_uses_placeholder() {
    let citizen = citizen().shroud();
    let map = citizen.to_redacted_map().unwrap();

    assert_eq!(map.get("ssn"), Some(&json!(HIDDEN_PLACEHOLDER)));
    assert_eq!(map.get("name"), Some(&json!("Ann")));
}

#[test]
fn test_null_redacted_keys_are_omitted() {
    let mut citizen = citizen().shroud();
    citizen.policy_mut().set_redact_enabled(false);

    let map = citizen.to_redacted_map().unwrap();
    assert!(!map.contains_key("ssn"));
    assert_eq!(map.get("name"), Some(&json!("Ann")));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_null_redacted_keys_are_kept_when_configured() {
    let mut citizen = citizen().shroud();
    citizen.policy_mut().set_redact_enabled(false);
    citizen.policy_mut().set_omit_null_redacted_keys(false);

    let map = citizen.to_redacted_map().unwrap();
    assert_eq!(map.get("ssn"), Some(&Value::Null));
    assert_eq!(map.get("name"), Some(&json!("Ann")));
}

#[derive(Serialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Redactable)]
struct Profile {
    id: u64,
    #[redact]
    email: String,
    age: u32,
    active: bool,
    address: Address,
}

fn profile() -> Profile {
    Profile {
        id: 7,
        email: "ann@example.com".into(),
        age: 34,
        active: true,
        address: Address {
            street: "123 Main Street".into(),
            city: "Springfield".into(),
        },
    }
}

#[test]
fn test_declaration_order_is_preserved() {
    let profile = profile().shroud();
    let map = profile.to_redacted_map().unwrap();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "email", "age", "active", "address"]);
}

#[test]
fn test_pass_through_fields_keep_their_types() {
    let profile = profile().shroud();
    let map = profile.to_redacted_map().unwrap();

    assert_eq!(map.get("id"), Some(&json!(7)));
    assert_eq!(map.get("age"), Some(&json!(34)));
    assert_eq!(map.get("active"), Some(&json!(true)));
}

#[test]
fn test_nested_values_serialize_expanded() {
    let profile = profile().shroud();
    let map = profile.to_redacted_map().unwrap();

    assert_eq!(
        map.get("address"),
        Some(&json!({ "street": "123 Main Street", "city": "Springfield" }))
    );
}

#[test]
fn test_serialize_emits_the_redacted_view() {
    let profile = profile().shroud();
    let serialized = serde_json::to_value(&profile).unwrap();

    assert_eq!(serialized["email"], json!(HIDDEN_PLACEHOLDER));
    assert_eq!(serialized["id"], json!(7));

    let rendered = serde_json::to_string(&profile).unwrap();
    assert!(!rendered.contains("ann@example.com"));
}

#[test]
fn test_debug_emits_the_redacted_view() {
    let profile = profile().shroud();
    let rendered = format!("{profile:?}");

    assert!(rendered.contains(HIDDEN_PLACEHOLDER));
    assert!(!rendered.contains("ann@example.com"));
}

fn initials_only(raw: &Value) -> Result<Value, BoxError> {
    let raw = raw.as_str().ok_or("expected a string")?;
    let initials: String = raw
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect();
    Ok(json!(initials))
}

#[derive(Redactable)]
#[redact(placeholder = "<withheld>", keep_null_keys)]
struct Informant {
    #[redact(with = "initials_only")]
    name: String,
    #[redact]
    handler: String,
    notes: String,
}

fn informant() -> Informant {
    Informant {
        name: "Gordon Shumway".into(),
        handler: "Kate Tanner".into(),
        notes: "reliable".into(),
    }
}

#[test]
fn test_container_attributes_seed_the_default_policy() {
    let informant = informant().shroud();

    assert_eq!(informant.policy().placeholder(), "<withheld>");
    assert!(!informant.policy().omit_null_redacted_keys());

    let map = informant.to_redacted_map().unwrap();
    assert_eq!(map.get("handler"), Some(&json!("<withheld>")));
    assert_eq!(map.get("notes"), Some(&json!("reliable")));
}

#[test]
fn test_registered_function_wins_over_custom_placeholder() {
    let informant = informant().shroud();
    let map = informant.to_redacted_map().unwrap();
    assert_eq!(map.get("name"), Some(&json!("GS")));
}

#[test]
fn test_keep_null_keys_applies_when_placeholder_disabled() {
    let mut informant = informant().shroud();
    informant.policy_mut().set_redact_enabled(false);
    informant.substitutions_mut().unregister("name");

    let map = informant.to_redacted_map().unwrap();
    assert_eq!(map.get("name"), Some(&Value::Null));
    assert_eq!(map.get("handler"), Some(&Value::Null));
    assert_eq!(map.get("notes"), Some(&json!("reliable")));
}

#[derive(Redactable)]
struct Tagged<T> {
    #[redact]
    secret: String,
    payload: T,
}

#[test]
fn test_generic_records_serialize_their_parameters() {
    let tagged = Tagged {
        secret: "hunter2".into(),
        payload: 42_i32,
    }
    .shroud();

    let map = tagged.to_redacted_map().unwrap();
    assert_eq!(map.get("secret"), Some(&json!(HIDDEN_PLACEHOLDER)));
    assert_eq!(map.get("payload"), Some(&json!(42)));
}

#[test]
fn test_bulk_and_single_access_agree() {
    let informant = informant().shroud();
    let map = informant.to_redacted_map().unwrap();

    for key in ["name", "handler", "notes"] {
        assert_eq!(map.get(key), informant.attribute(key).unwrap().as_ref());
    }
}

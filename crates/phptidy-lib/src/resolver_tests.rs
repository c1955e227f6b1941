use std::collections::HashMap;

use crate::resolver::{NameMaps, NoResolver, Resolver, is_obfuscated_variable, is_obfuscated_word};

#[test]
fn obfuscated_shapes() {
    assert!(is_obfuscated_variable("$_5dddbc71"));
    assert!(is_obfuscated_word("_0e5ea304"));

    // Superglobals are uppercase and must never be looked up.
    assert!(!is_obfuscated_variable("$_POST"));
    assert!(!is_obfuscated_variable("$_SERVER"));

    // Wrong length, wrong alphabet, missing prefix.
    assert!(!is_obfuscated_word("_5dddbc7"));
    assert!(!is_obfuscated_word("_5dddbc712"));
    assert!(!is_obfuscated_word("_5dddbg71"));
    assert!(!is_obfuscated_word("5dddbc71"));
    assert!(!is_obfuscated_variable("$version_str"));
}

#[test]
fn hash_map_resolver() {
    let mut map = HashMap::new();
    map.insert("$_f26ec1be".to_string(), "$version_str".to_string());

    assert_eq!(map.resolve("$_f26ec1be"), Some("$version_str"));
    assert_eq!(map.resolve("$_deadbeef"), None);
    assert_eq!(NoResolver.resolve("$_f26ec1be"), None);
}

#[test]
fn name_maps_from_json() {
    let maps = NameMaps::from_json(
        r#"{
            "functions": {"_f43c4f66": "html_end"},
            "variables": {"$_bfa4ce15": "$charset"}
        }"#,
    )
    .unwrap();

    assert_eq!(maps.functions.resolve("_f43c4f66"), Some("html_end"));
    assert_eq!(maps.variables.resolve("$_bfa4ce15"), Some("$charset"));
}

#[test]
fn name_maps_sections_are_optional() {
    let maps = NameMaps::from_json(r#"{"functions": {"_5dddbc71": "db_error"}}"#).unwrap();
    assert!(maps.variables.is_empty());
    assert_eq!(maps.functions.len(), 1);
}

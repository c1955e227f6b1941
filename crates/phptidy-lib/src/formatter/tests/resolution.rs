use crate::diagnostics::AdvisoryKind;
use crate::resolver::NameMaps;
use crate::{Formatter, format};

fn maps() -> NameMaps {
    NameMaps::from_json(
        r#"{
            "functions": {"_0e5ea304": "db_connect"},
            "variables": {"$_5dddbc71": "$db_error"}
        }"#,
    )
    .unwrap()
}

#[test]
fn mapped_variables_are_renamed() {
    let maps = maps();
    let result = Formatter::new("<?php\n$_5dddbc71 = $_5dddbc71 + 1;\n?>\n")
        .variable_resolver(&maps.variables)
        .function_resolver(&maps.functions)
        .run()
        .unwrap();

    assert_eq!(result.text, "<?php\n$db_error = $db_error + 1;\n?>\n");
    assert!(result.variables.contains("$db_error"));
    assert!(result.unresolved.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn unmapped_obfuscated_variable_reported_once() {
    let result = format("<?php\n$_deadbeef = $_deadbeef + 1;\n?>\n").unwrap();

    assert_eq!(result.text, "<?php\n$_deadbeef = $_deadbeef + 1;\n?>\n");
    assert_eq!(result.sorted_unresolved(), vec!["$_deadbeef"]);

    let kinds: Vec<_> = result.diagnostics.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AdvisoryKind::UnresolvedVariable]);
    let advisory = result.diagnostics.iter().next().unwrap();
    assert_eq!(advisory.message, "`$_deadbeef` is not in the rename map");
}

#[test]
fn superglobals_are_not_rename_candidates() {
    let result = format("<?php\necho $_POST;\n?>\n").unwrap();
    assert!(result.diagnostics.is_empty());
    assert!(result.variables.contains("$_POST"));
}

#[test]
fn mapped_function_definition_is_renamed() {
    let maps = maps();
    let result = Formatter::new("<?php\nfunction _0e5ea304($a) {\n    return $a;\n}\n?>\n")
        .variable_resolver(&maps.variables)
        .function_resolver(&maps.functions)
        .run()
        .unwrap();

    assert!(result.text.contains("function db_connect($a) {"));
    // The raw definition name still lands in the words record.
    assert!(result.words.contains("_0e5ea304"));
    assert!(result.unresolved.is_empty());
}

#[test]
fn unmapped_function_definition_reported() {
    let result = format("<?php\nfunction _0e5ea304($a) {\n    return $a;\n}\n?>\n").unwrap();

    assert!(result.text.contains("function _0e5ea304($a) {"));
    assert_eq!(result.sorted_unresolved(), vec!["_0e5ea304"]);
    assert!(
        result
            .diagnostics
            .iter()
            .any(|a| a.kind == AdvisoryKind::UnresolvedFunction)
    );
}

#[test]
fn identifier_records_sort_on_demand() {
    let result = format("<?php\n$b = 1;\n$a = 2;\n?>\n").unwrap();

    let seen: Vec<_> = result.variables.iter().map(String::as_str).collect();
    assert_eq!(seen, vec!["$b", "$a"]);
    assert_eq!(result.sorted_variables(), vec!["$a", "$b"]);
}

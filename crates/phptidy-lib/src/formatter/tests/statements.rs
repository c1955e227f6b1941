use crate::diagnostics::AdvisoryKind;
use crate::{Construct, Error, format};

#[test]
fn text_outside_tags_passes_through() {
    let result = format("<p>no php here</p>\n").unwrap();
    assert_eq!(result.text, "<p>no php here</p>\n");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn semicolon_drops_preceding_space() {
    let result = format("<?php\n$x = 1 ;\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\n$x = 1;\n?>\n");
    let kinds: Vec<_> = result.diagnostics.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AdvisoryKind::SpaceBeforeSemicolon]);
}

#[test]
fn duplicate_semicolons_collapse() {
    let result = format("<?php\n$x = 1;;\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\n$x = 1;\n?>\n");
    let kinds: Vec<_> = result.diagnostics.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AdvisoryKind::EmptyStatement]);
}

#[test]
fn missing_operator_spacing_is_inserted() {
    let result = format("<?php\n$x=1;\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\n$x = 1;\n?>\n");

    assert_eq!(result.diagnostics.len(), 2);
    assert!(
        result
            .diagnostics
            .iter()
            .all(|a| a.kind == AdvisoryKind::MissingSpace)
    );
    let first = result.diagnostics.iter().next().unwrap();
    assert_eq!(first.message, "expected a space before `=`");
}

#[test]
fn tight_operators_bind_directly() {
    let result = format("<?php\n$i++;\n$obj->f();\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\n$i++;\n$obj->f();\n?>\n");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn comma_spacing_is_normalized() {
    let result = format("<?php\necho $a ,$b;\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\necho $a, $b;\n?>\n");
    let kinds: Vec<_> = result.diagnostics.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AdvisoryKind::SpaceBeforeComma,
            AdvisoryKind::MissingSpaceAfterComma
        ]
    );
}

#[test]
fn blank_lines_are_kept_but_flagged() {
    let result = format("<?php\n$a;\n\n\n$b;\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\n$a;\n\n\n$b;\n?>\n");
    let kinds: Vec<_> = result.diagnostics.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![AdvisoryKind::ExtraBlankLine, AdvisoryKind::ExtraBlankLine]
    );
}

#[test]
fn tab_as_spacing_is_flagged() {
    let result = format("<?php\n$x =\t1;\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\n$x = 1;\n?>\n");
    let kinds: Vec<_> = result.diagnostics.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AdvisoryKind::TabInsteadOfSpace]);
}

#[test]
fn string_literals_are_verbatim() {
    let result = format("<?php\necho 'a \\' b$x{';\n?>\n").unwrap();
    assert_eq!(result.text, "<?php\necho 'a \\' b$x{';\n?>\n");
    assert!(result.variables.is_empty());
}

#[test]
fn unterminated_string_is_fatal() {
    let err = format("<?php\necho 'oops;\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Unterminated {
            construct: Construct::StringLiteral,
            ..
        }
    ));
    assert_eq!(err.position().line, 2);
}

#[test]
fn block_comments_are_verbatim() {
    let source = "<?php\n/* keep\n   this */\necho 1;\n?>\n";
    let result = format(source).unwrap();
    assert_eq!(result.text, source);
}

#[test]
fn unterminated_block_comment_is_fatal() {
    let err = format("<?php /* oops").unwrap_err();
    assert!(matches!(
        err,
        Error::Unterminated {
            construct: Construct::BlockComment,
            ..
        }
    ));
}

#[test]
fn line_comment_runs_to_end_of_line() {
    let source = "<?php\n// note\necho 1;\n?>\n";
    let result = format(source).unwrap();
    assert_eq!(result.text, source);
}

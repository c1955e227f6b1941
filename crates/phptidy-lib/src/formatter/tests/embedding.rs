use indoc::indoc;

use crate::{Construct, Error, format};

#[test]
fn close_tag_inside_block_is_passthrough() {
    let source = indoc! {"
        <?php
        if ($a) {
            ?>
        <b>html</b>
        <?php
            echo 1;
        }
        ?>
    "};
    let result = format(source).unwrap();
    assert_eq!(result.text, source);
}

#[test]
fn unterminated_embedded_block_is_fatal() {
    let err = format("<?php\nif ($a) {\n?>never comes back").unwrap_err();
    assert!(matches!(
        err,
        Error::Unterminated {
            construct: Construct::EmbeddedBlock,
            ..
        }
    ));
}

#[test]
fn multiple_php_sections_in_one_document() {
    let source = "<a><?php $x; ?></a><?php $y; ?>";
    let result = format(source).unwrap();
    assert_eq!(result.text, source);
    assert_eq!(result.sorted_variables(), vec!["$x", "$y"]);
}

#[test]
fn input_without_close_tag_still_formats() {
    let result = format("<?php\necho 1;\n").unwrap();
    assert_eq!(result.text, "<?php\necho 1;\n");
}

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::decode::recover_source;

const PLAIN_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const REVERSED_ALPHABET: &str = "ZYXWVUTSRQPONMLKJIHGFEDCBAzyxwvutsrqponmlkjihgfedcba";

/// Apply the inverse substitution: produce the stored payload that decodes
/// back to `encoded` under `alphabet`.
fn obfuscate(alphabet: &str, encoded: &str) -> String {
    let table: Vec<char> = alphabet.chars().collect();
    encoded
        .chars()
        .map(|c| match table.iter().position(|&t| t == c) {
            Some(i) if i < 26 => (b'a' + i as u8) as char,
            Some(i) => (b'A' + (i - 26) as u8) as char,
            None => c,
        })
        .collect()
}

fn payload_file(alphabet: &str, source: &str) -> String {
    let encoded = STANDARD.encode(source.as_bytes());
    format!(
        "<?php /*CNS123456{alphabet}{}*/ eval(); ?>",
        obfuscate(alphabet, &encoded)
    )
}

#[test]
fn identity_alphabet_round_trips() {
    let file = payload_file(PLAIN_ALPHABET, "echo $x;");
    assert_eq!(recover_source(&file).unwrap(), "<?php \necho $x;");
}

#[test]
fn substituted_alphabet_round_trips() {
    let file = payload_file(REVERSED_ALPHABET, "echo $x;\necho $y;\n");
    assert_eq!(recover_source(&file).unwrap(), "<?php \necho $x;\necho $y;\n");
}

#[test]
fn file_without_comment_is_rejected() {
    assert_eq!(recover_source("<?php echo 1; ?>"), None);
}

#[test]
fn short_comment_is_rejected() {
    assert_eq!(recover_source("<?php /* just a comment */ ?>"), None);
}

#[test]
fn garbage_payload_is_rejected() {
    let garbage = format!("<?php /*CNS000000{PLAIN_ALPHABET}!!!not base64 at all!!!*/ ?>");
    assert_eq!(recover_source(&garbage), None);
}

use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use phptidy_lib::Formatter;
use phptidy_lib::diagnostics::render_fatal;

use crate::util::{load_input, load_maps, write_output};

/// The obfuscator hides the real source in the file's first block comment:
/// a `CNS` marker plus six digits, then a 52-letter substitution alphabet,
/// then the substituted base64 of the original code.
const MARKER_LEN: usize = "CNS".len() + 6;
const ALPHABET_LEN: usize = 52;

pub struct DecodeArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub maps: Option<PathBuf>,
    pub verbose: bool,
    pub color: bool,
}

pub fn run(args: DecodeArgs) {
    let (text, _) = load_input(Some(&args.input));
    let maps = load_maps(args.maps.as_deref());

    let recovered = match recover_source(&text) {
        Some(recovered) => recovered,
        None => {
            eprintln!("warning: no decodable payload found, formatting the file as-is");
            text
        }
    };

    let result = Formatter::new(&recovered)
        .variable_resolver(&maps.variables)
        .function_resolver(&maps.functions)
        .run();

    match result {
        Ok(formatted) => {
            super::fmt::report(&formatted, &recovered, None, args.color, args.verbose);
            write_output(args.output.as_deref(), &formatted.text);
        }
        Err(e) => {
            // Recovered text is still worth keeping even when it won't parse.
            eprintln!("{}", render_fatal(&recovered, None, &e, args.color));
            eprintln!("warning: writing the recovered text unformatted");
            write_output(args.output.as_deref(), &recovered);
        }
    }
}

/// Extract and decode the payload. `None` when the file doesn't carry one
/// (no comment, comment too short, or the payload doesn't decode).
pub(super) fn recover_source(text: &str) -> Option<String> {
    let start = text.find("/*")? + 2;
    let rest = &text[start..];
    let comment = match rest.find("*/") {
        Some(end) => &rest[..end],
        None => rest,
    };

    let chars: Vec<char> = comment.chars().collect();
    if chars.len() < MARKER_LEN + ALPHABET_LEN {
        return None;
    }
    let alphabet = &chars[MARKER_LEN..MARKER_LEN + ALPHABET_LEN];
    let payload = &chars[MARKER_LEN + ALPHABET_LEN..];

    let translated: String = payload
        .iter()
        .map(|&c| substitute(c, alphabet))
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();

    let bytes = STANDARD.decode(translated.as_bytes()).ok()?;
    let source = String::from_utf8(bytes).ok()?;

    // The payload was written for eval, so the open tag is missing.
    Some(format!("<?php \n{source}"))
}

/// The substitution maps the 52 letters onto the stored alphabet
/// (`a` to entry 0, `Z` to entry 51); every other character is kept.
fn substitute(c: char, alphabet: &[char]) -> char {
    match c {
        'a'..='z' => alphabet[c as usize - 'a' as usize],
        'A'..='Z' => alphabet[c as usize - 'A' as usize + 26],
        _ => c,
    }
}

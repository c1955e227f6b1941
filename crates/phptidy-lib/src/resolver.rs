//! Identifier resolution for automatically renamed (obfuscated) names.
//!
//! The obfuscator rewrites identifiers to `_` plus eight lowercase hex
//! digits (variables keep their `$` sigil in front). The formatter consults
//! an injected [`Resolver`] for every identifier of that shape and
//! substitutes the human-readable name in the output. The tables themselves
//! come from outside the core, typically a JSON [`NameMaps`] file.

use std::collections::HashMap;

use serde::Deserialize;

/// Read-only lookup from obfuscated identifier to human-readable form.
///
/// Implementations must be side-effect free; a single resolver may be shared
/// across any number of parses.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Option<&str>;
}

impl Resolver for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Resolver that knows nothing. Every obfuscated-shape identifier passes
/// through unchanged and is reported as unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolver for NoResolver {
    fn resolve(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Deserialized rename tables: `{"functions": {...}, "variables": {...}}`.
///
/// Variable keys carry the `$` sigil (`"$_5dddbc71": "$db_error_code"`),
/// function keys don't (`"_5dddbc71": "db_error"`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameMaps {
    #[serde(default)]
    pub functions: HashMap<String, String>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl NameMaps {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Whether `name` (with sigil) matches the shape the variable obfuscator
/// produces: `$_` plus exactly eight lowercase hex digits. Superglobals
/// like `$_POST` don't match and are never looked up.
pub(crate) fn is_obfuscated_variable(name: &str) -> bool {
    name.strip_prefix('$').is_some_and(is_obfuscated_word)
}

/// Whether a bare word matches the obfuscated shape: `_` plus exactly eight
/// lowercase hex digits.
pub(crate) fn is_obfuscated_word(name: &str) -> bool {
    name.strip_prefix('_').is_some_and(|rest| {
        rest.len() == 8
            && rest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    })
}

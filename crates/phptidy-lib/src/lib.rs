//! phptidy: single-pass recognizer and pretty-printer for PHP embedded in
//! free-form text.
//!
//! The formatter scans the input once, character by character, and re-emits a
//! canonically formatted copy while it recognizes the grammar. There is no
//! AST: formatting decisions are made online as each construct is consumed,
//! and speculative parses (else-chains) roll back both the cursor and the
//! output buffer through explicit checkpoints.
//!
//! # Example
//!
//! ```
//! use phptidy_lib::format;
//!
//! let tidy = format("<?php\nif($a){echo 1;}else{echo 2;}\n?>").unwrap();
//! assert!(tidy.text.contains("} else {"));
//! ```

pub mod cursor;
pub mod diagnostics;
pub mod formatter;
pub mod resolver;

#[cfg(test)]
mod resolver_tests;

pub use cursor::{Checkpoint, Cursor, Position};
pub use diagnostics::{Advisory, AdvisoryKind, Diagnostics, DiagnosticsPrinter};
pub use formatter::{FormatOptions, Formatted, Formatter, format};
pub use resolver::{NameMaps, NoResolver, Resolver};

/// A syntactic construct that can be left unterminated at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    StringLiteral,
    BlockComment,
    Expression,
    FunctionBody,
    EmbeddedBlock,
}

impl std::fmt::Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Construct::StringLiteral => "string literal",
            Construct::BlockComment => "block comment",
            Construct::Expression => "parenthesized expression",
            Construct::FunctionBody => "function body",
            Construct::EmbeddedBlock => "embedded PHP block",
        };
        f.write_str(name)
    }
}

/// Fatal parse errors. Advisories (spacing, indentation, unresolved names)
/// never abort the parse and live in [`Diagnostics`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// End of input inside a construct that requires a terminator.
    #[error("unexpected end of input inside {construct} starting at {position}")]
    Unterminated {
        construct: Construct,
        position: Position,
    },

    /// A control keyword that requires a parenthesized condition isn't
    /// followed by one.
    #[error("expected a parenthesized condition after `{keyword}` at {position}")]
    MissingCondition {
        keyword: &'static str,
        position: Position,
    },

    /// A named function definition isn't followed by its parameter list.
    #[error("expected a parameter list after the function name at {position}")]
    MissingParameterList { position: Position },

    /// A function signature isn't followed by a braced body.
    #[error("expected `{{` to open the function body at {position}")]
    MissingFunctionBody { position: Position },

    /// Input nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

impl Error {
    /// The position where the parse failed. The input up to
    /// [`Position::offset`] is exactly what the parser consumed.
    pub fn position(&self) -> Position {
        match self {
            Error::Unterminated { position, .. }
            | Error::MissingCondition { position, .. }
            | Error::MissingParameterList { position }
            | Error::MissingFunctionBody { position }
            | Error::NestingTooDeep { position, .. } => *position,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

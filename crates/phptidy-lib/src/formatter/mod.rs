//! The recognizer-printer.
//!
//! A single pass over the input both recognizes the embedded PHP grammar and
//! re-emits it canonically formatted. There is no token stream and no tree:
//! each grammar rule consumes characters from the [`Cursor`] and appends
//! formatted fragments to an output buffer as it goes. Speculation (the
//! else-chain lookahead) checkpoints the cursor and the buffer together and
//! rolls both back on failure.
//!
//! Text outside `<?php ... ?>` passes through untouched.

mod buffer;
mod grammar;
mod lexical;

#[cfg(test)]
mod tests;

use indexmap::IndexSet;

use crate::cursor::Cursor;
use crate::diagnostics::{AdvisoryKind, Diagnostics};
use crate::resolver::Resolver;
use crate::{Error, Result};

use buffer::Buffer;

/// Knobs for a single format run.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Rewrite spacing, indentation, and braces. When off, the input is
    /// reproduced nearly verbatim and only advisories are collected.
    pub cleanup: bool,
    /// One level of indentation, prepended once per block depth.
    pub indent_unit: String,
    /// Fatal [`Error::NestingTooDeep`] beyond this many nested constructs.
    pub max_depth: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            cleanup: true,
            indent_unit: "    ".to_string(),
            max_depth: 128,
        }
    }
}

impl FormatOptions {
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Result of a successful format run.
#[derive(Debug)]
pub struct Formatted {
    /// The reformatted text.
    pub text: String,
    /// Advisories collected along the way.
    pub diagnostics: Diagnostics,
    /// Distinct variable names, post-resolution, in first-seen order.
    pub variables: IndexSet<String>,
    /// Distinct bare words (functions, keywords, constants) in first-seen
    /// order.
    pub words: IndexSet<String>,
    /// Obfuscated-shape identifiers no resolver knew, each recorded once.
    pub unresolved: IndexSet<String>,
}

impl Formatted {
    pub fn sorted_variables(&self) -> Vec<&str> {
        sorted(&self.variables)
    }

    pub fn sorted_words(&self) -> Vec<&str> {
        sorted(&self.words)
    }

    pub fn sorted_unresolved(&self) -> Vec<&str> {
        sorted(&self.unresolved)
    }
}

fn sorted(set: &IndexSet<String>) -> Vec<&str> {
    let mut names: Vec<&str> = set.iter().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// One format run over one input. Construct with [`Formatter::new`],
/// configure with the builder methods, consume with [`Formatter::run`].
pub struct Formatter<'r> {
    cursor: Cursor,
    opts: FormatOptions,
    /// Indentation of the current line. Grows and shrinks with block
    /// nesting; pinned to the opening column inside expressions.
    indent: String,
    /// Working copy of [`FormatOptions::indent_unit`]; emptied while an
    /// expression suspends indentation tracking.
    unit: String,
    depth: usize,
    diagnostics: Diagnostics,
    variables: IndexSet<String>,
    words: IndexSet<String>,
    unresolved: IndexSet<String>,
    variable_resolver: Option<&'r dyn Resolver>,
    function_resolver: Option<&'r dyn Resolver>,
}

impl<'r> Formatter<'r> {
    pub fn new(source: &str) -> Self {
        let opts = FormatOptions::default();
        Self {
            cursor: Cursor::new(source),
            unit: opts.indent_unit.clone(),
            opts,
            indent: String::new(),
            depth: 0,
            diagnostics: Diagnostics::new(),
            variables: IndexSet::new(),
            words: IndexSet::new(),
            unresolved: IndexSet::new(),
            variable_resolver: None,
            function_resolver: None,
        }
    }

    pub fn options(mut self, opts: FormatOptions) -> Self {
        self.unit = opts.indent_unit.clone();
        self.opts = opts;
        self
    }

    pub fn variable_resolver(mut self, resolver: &'r dyn Resolver) -> Self {
        self.variable_resolver = Some(resolver);
        self
    }

    pub fn function_resolver(mut self, resolver: &'r dyn Resolver) -> Self {
        self.function_resolver = Some(resolver);
        self
    }

    /// Drive the whole input: verbatim passthrough outside `<?php`, one
    /// block parse per open tag.
    pub fn run(mut self) -> Result<Formatted> {
        let mut out = Buffer::new();

        while let Some(c) = self.cursor.peek() {
            if self.cursor.has_prefix("<?php") {
                out.push("<?php");
                self.cursor.advance(5);
                let block = self.section(0, false)?;
                out.push(&block);
                if self.cursor.has_prefix("?>") {
                    out.push("?>");
                    self.cursor.advance(2);
                }
            } else {
                out.push_char(c);
                self.cursor.advance(1);
            }
        }

        Ok(Formatted {
            text: out.concat(),
            diagnostics: self.diagnostics,
            variables: self.variables,
            words: self.words,
            unresolved: self.unresolved,
        })
    }

    fn enter_nesting(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.opts.max_depth,
                position: self.cursor.position(),
            });
        }
        Ok(())
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    fn warn(&mut self, kind: AdvisoryKind) {
        self.diagnostics.report(kind, self.cursor.position()).emit();
    }
}

/// Format `source` with default options and no resolvers.
pub fn format(source: &str) -> Result<Formatted> {
    Formatter::new(source).run()
}

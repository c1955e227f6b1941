//! Lexical rules: tokens that are recognized and re-emitted in one step.
//!
//! Strings, comments, words, and variables reproduce their input exactly
//! (modulo identifier resolution). The whitespace expectations
//! (`expect_space`, `expect_newline`, `line_indent`) are where most of the
//! normalization happens.

use crate::Construct;
use crate::cursor::is_word_char;
use crate::diagnostics::AdvisoryKind;
use crate::resolver::is_obfuscated_variable;
use crate::{Error, Result};

use super::Formatter;
use super::buffer::Buffer;
use super::grammar::OPERATORS;

impl Formatter<'_> {
    /// A `'...'` or `"..."` literal, reproduced verbatim. `\` protects the
    /// following character, including the quote.
    pub(super) fn string_literal(&mut self) -> Result<String> {
        let start = self.cursor.position();
        let Some(quote) = self.cursor.bump() else {
            return Err(Error::Unterminated {
                construct: Construct::StringLiteral,
                position: start,
            });
        };

        let mut out = String::from(quote);
        while let Some(c) = self.cursor.bump() {
            out.push(c);
            if c == '\\' {
                if let Some(protected) = self.cursor.bump() {
                    out.push(protected);
                }
            } else if c == quote {
                return Ok(out);
            }
        }

        Err(Error::Unterminated {
            construct: Construct::StringLiteral,
            position: start,
        })
    }

    /// `/* ... */`, verbatim.
    pub(super) fn block_comment(&mut self) -> Result<String> {
        let start = self.cursor.position();
        let mut out = String::from("/*");
        self.cursor.advance(2);

        while !self.cursor.at_end() {
            if self.cursor.has_prefix("*/") {
                out.push_str("*/");
                self.cursor.advance(2);
                return Ok(out);
            }
            if let Some(c) = self.cursor.bump() {
                out.push(c);
            }
        }

        Err(Error::Unterminated {
            construct: Construct::BlockComment,
            position: start,
        })
    }

    /// `//` to the end of the line, exclusive. End of input is fine.
    pub(super) fn line_comment(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.cursor.peek() {
            if c == '\n' {
                break;
            }
            out.push(c);
            self.cursor.advance(1);
        }
        out
    }

    /// A maximal identifier run: function name, keyword, or constant.
    /// Recorded as-is in the words set.
    pub(super) fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.cursor.peek() {
            if !is_word_char(c) {
                break;
            }
            word.push(c);
            self.cursor.advance(1);
        }
        self.words.insert(word.clone());
        word
    }

    /// `$` plus a maximal identifier run. Obfuscated-shape names go through
    /// the variable resolver; whatever name survives is recorded and
    /// emitted.
    pub(super) fn variable(&mut self) -> String {
        let start = self.cursor.position();
        let mut name = String::from('$');
        self.cursor.advance(1);
        while let Some(c) = self.cursor.peek() {
            if !is_word_char(c) {
                break;
            }
            name.push(c);
            self.cursor.advance(1);
        }

        if is_obfuscated_variable(&name) {
            if let Some(resolver) = self.variable_resolver {
                if let Some(resolved) = resolver.resolve(&name) {
                    let resolved = resolved.to_string();
                    self.variables.insert(resolved.clone());
                    return resolved;
                }
            }
            if self.unresolved.insert(name.clone()) {
                self.diagnostics
                    .report(AdvisoryKind::UnresolvedVariable, start)
                    .detail(&name)
                    .emit();
            }
        }

        self.variables.insert(name.clone());
        name
    }

    /// Exactly one space is wanted here. Collapses runs of whitespace,
    /// reflows newlines as a continuation line (unless the caller strips
    /// them), and inserts the space if the input forgot it.
    pub(super) fn expect_space(&mut self, strip_newlines: bool) -> String {
        let mut out = String::new();

        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' => {
                    if !self.opts.cleanup {
                        out.push('\n');
                    } else if !strip_newlines {
                        out.push('\n');
                        out.push_str(&self.indent);
                        out.push_str(&self.unit);
                    }
                    self.cursor.advance(1);
                }
                ' ' => {
                    if out.is_empty() || !self.opts.cleanup {
                        out.push(' ');
                    }
                    self.cursor.advance(1);
                }
                '\t' => {
                    self.warn(AdvisoryKind::TabInsteadOfSpace);
                    out.push(if self.opts.cleanup { ' ' } else { '\t' });
                    self.cursor.advance(1);
                }
                _ => {
                    if out.is_empty() {
                        self.warn(AdvisoryKind::MissingSpace);
                        if self.opts.cleanup {
                            out.push(' ');
                        }
                    }
                    break;
                }
            }
        }

        out
    }

    /// A statement just ended; the next content belongs on its own line.
    /// Consumes trailing spaces. An actual newline is left for
    /// [`Formatter::line_indent`]; `?>` gets a single space instead of a
    /// line break; anything else gets a synthesized newline plus indent.
    pub(super) fn expect_newline(&mut self) -> String {
        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' => return String::new(),
                ' ' | '\t' => {
                    self.cursor.advance(1);
                }
                _ => {
                    if self.cursor.has_prefix("?>") {
                        return " ".to_string();
                    }
                    return format!("\n{}", self.indent);
                }
            }
        }
        String::new()
    }

    /// At a newline: consume it, flag blank lines, and re-indent the next
    /// line. Once an indent context exists (`established`), cleanup mode
    /// enforces the current indent and flags mismatches; otherwise the
    /// measured indentation becomes the current indent.
    pub(super) fn line_indent(&mut self, established: bool) -> String {
        self.cursor.advance(1);
        let mut blanks = String::from("\n");
        let mut measured = String::new();

        while let Some(c) = self.cursor.peek() {
            match c {
                '\n' => {
                    self.warn(AdvisoryKind::ExtraBlankLine);
                    blanks.push('\n');
                    measured.clear();
                    self.cursor.advance(1);
                }
                ' ' | '\t' => {
                    measured.push(c);
                    self.cursor.advance(1);
                }
                _ => {
                    if established && self.opts.cleanup {
                        if measured != self.indent {
                            self.warn(AdvisoryKind::InconsistentIndentation);
                        }
                    } else {
                        self.indent = measured;
                    }
                    return format!("{blanks}{}", self.indent);
                }
            }
        }

        // Input ended on a newline.
        blanks
    }

    /// `(` through the matching `)`, recursive. Inside, indentation
    /// tracking is suspended: continuation lines align under the opening
    /// parenthesis instead of stepping with block depth.
    pub(super) fn expression(&mut self) -> Result<String> {
        self.enter_nesting()?;
        let start = self.cursor.position();
        let mut out = Buffer::new();
        out.push("(");
        self.cursor.advance(1);

        let mut suspended = if self.opts.cleanup {
            let pinned = " ".repeat(self.cursor.column() as usize);
            let previous = (
                std::mem::replace(&mut self.indent, pinned),
                std::mem::take(&mut self.unit),
            );
            while matches!(self.cursor.peek(), Some(' ' | '\t')) {
                self.cursor.advance(1);
            }
            Some(previous)
        } else {
            None
        };

        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(Error::Unterminated {
                    construct: Construct::Expression,
                    position: start,
                });
            };
            match c {
                ')' => {
                    if let Some((indent, unit)) = suspended.take() {
                        out.trim_trailing_space();
                        self.indent = indent;
                        self.unit = unit;
                    }
                    out.push(")");
                    self.cursor.advance(1);
                    self.exit_nesting();
                    return Ok(out.concat());
                }
                '\n' => {
                    out.push("\n");
                    self.cursor.advance(1);
                }
                '(' => {
                    let inner = self.expression()?;
                    out.push(&inner);
                }
                '"' | '\'' => {
                    let literal = self.string_literal()?;
                    out.push(&literal);
                }
                '$' => {
                    let name = self.variable();
                    out.push(&name);
                }
                ';' | ',' => {
                    out.push_char(c);
                    self.cursor.advance(1);
                    let space = self.expect_space(false);
                    out.push(&space);
                }
                ' ' | '\t' => {
                    if self.opts.cleanup {
                        out.trim_trailing_space();
                    }
                    out.push(" ");
                    self.cursor.advance(1);
                }
                _ => {
                    if self.cursor.has_prefix("/*") {
                        let comment = self.block_comment()?;
                        out.push(&comment);
                    } else if self.cursor.has_prefix("//") {
                        let comment = self.line_comment();
                        out.push(&comment);
                        let space = self.expect_space(false);
                        out.push(&space);
                    } else if let Some(op) = self.cursor.starts_with(OPERATORS) {
                        self.operator(&mut out, op);
                    } else {
                        out.push_char(c);
                        self.cursor.advance(1);
                    }
                }
            }
        }
    }

    /// Verbatim copy of `?> ... <?php` inside a block: the close tag does
    /// not end a block at depth > 0, it suspends it.
    pub(super) fn tag_passthrough(&mut self) -> Result<String> {
        let start = self.cursor.position();
        let mut out = String::new();

        while !self.cursor.at_end() {
            if self.cursor.has_prefix("<?php") {
                out.push_str("<?php");
                self.cursor.advance(5);
                return Ok(out);
            }
            if let Some(c) = self.cursor.bump() {
                out.push(c);
            }
        }

        Err(Error::Unterminated {
            construct: Construct::EmbeddedBlock,
            position: start,
        })
    }
}

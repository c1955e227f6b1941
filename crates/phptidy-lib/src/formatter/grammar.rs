//! Block-level grammar: statements, control constructs, functions.
//!
//! Every rule appends to the caller's output buffer while consuming input.
//! `section` is the block parser; everything else is a dispatch target for
//! one construct at the current position.

use crate::Construct;
use crate::cursor::{Position, is_word_char};
use crate::diagnostics::AdvisoryKind;
use crate::resolver::is_obfuscated_word;
use crate::{Error, Result};

use super::Formatter;
use super::buffer::Buffer;

/// Control keywords that open a construct. Longest first so that `else if`
/// and `elseif` win over `else` and `if`; matched with a word boundary.
pub(super) const KEYWORDS: &[&str] = &[
    "else if", "elseif", "foreach", "switch", "while", "else", "for", "do", "if",
];

/// Operator table, longest match first.
pub(super) const OPERATORS: &[&str] = &[
    "===", "!==", // three chars before their two-char prefixes
    ".=", "+=", "-=", "*=", "/=", "&&", "||", "==", "=>", "->", "::", "!=", "<<", ">>", "<=",
    ">=", "++", "--", // two chars before one
    ".", "+", "-", "*", "/", "&", "^", "%", "|", "?", ":", "=", "<", ">",
];

/// Operators that attach to their operand with no surrounding spaces.
fn is_tight(op: &str) -> bool {
    matches!(op, "++" | "--" | "::" | "->")
}

impl Formatter<'_> {
    /// Parse one block of PHP. A block runs from after `<?php` or `{` up to
    /// the matching `}`, the `?>` terminator (depth 0 only, left
    /// unconsumed), a terminating `;` when `end_at_semicolon` is set, or end
    /// of input.
    pub(super) fn section(&mut self, level: usize, end_at_semicolon: bool) -> Result<String> {
        self.enter_nesting()?;
        let mut out = Buffer::new();
        // Indentation of the first re-indented line; once set, later lines
        // are checked against the tracked indent instead of resetting it.
        let mut basic_indent: Option<String> = None;

        while let Some(c) = self.cursor.peek() {
            if self.cursor.has_prefix("?>") {
                if level == 0 {
                    if basic_indent.is_some() && out.last() == basic_indent.as_deref() {
                        out.replace_last("\n");
                    }
                    break;
                }
                let html = self.tag_passthrough()?;
                out.push(&html);
                continue;
            }

            match c {
                ' ' | '\t' if out.is_empty() => self.initial_whitespace(&mut out, level),
                '{' => self.curly_block(&mut out, level)?,
                '}' => {
                    self.end_brace(&mut out);
                    break;
                }
                ';' => {
                    self.semicolon(&mut out);
                    if end_at_semicolon {
                        break;
                    }
                }
                '\n' => {
                    let established = level > 0 || basic_indent.is_some();
                    let fragment = self.line_indent(established);
                    if basic_indent.is_none() {
                        basic_indent = Some(fragment.clone());
                    }
                    out.push(&fragment);
                }
                ',' => self.comma(&mut out),
                '"' | '\'' => {
                    let literal = self.string_literal()?;
                    out.push(&literal);
                }
                '$' => {
                    let name = self.variable();
                    out.push(&name);
                }
                '(' => {
                    let expr = self.expression()?;
                    out.push(&expr);
                }
                _ => {
                    if self.cursor.has_prefix("/*") {
                        let comment = self.block_comment()?;
                        out.push(&comment);
                    } else if self.cursor.has_prefix("//") {
                        let comment = self.line_comment();
                        out.push(&comment);
                    } else if let Some(op) = self.cursor.starts_with(OPERATORS) {
                        self.operator(&mut out, op);
                    } else if let Some(keyword) = self.match_keyword() {
                        self.keyword_construct(&mut out, level, keyword)?;
                    } else if self.cursor.has_word_prefix("function") {
                        self.function_construct(&mut out, level)?;
                    } else if is_word_char(c) {
                        let word = self.word();
                        out.push(&word);
                    } else {
                        out.push_char(c);
                        self.cursor.advance(1);
                    }
                }
            }
        }

        self.exit_nesting();
        Ok(out.concat())
    }

    fn match_keyword(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .copied()
            .find(|keyword| self.cursor.has_word_prefix(keyword))
    }

    /// Whitespace before any content in a block: at depth 0 it passes
    /// through, inside a block it collapses into the re-indent rule.
    fn initial_whitespace(&mut self, out: &mut Buffer, level: usize) {
        if level > 0 {
            let fragment = self.expect_newline();
            out.push(&fragment);
        } else if let Some(c) = self.cursor.bump() {
            out.push_char(c);
        }
    }

    /// `;`: flag anomalies, then trim any stray trailing whitespace or
    /// duplicate semicolons and emit exactly one, followed by the
    /// end-of-statement line break.
    fn semicolon(&mut self, out: &mut Buffer) {
        if out.is_empty() {
            self.warn(AdvisoryKind::LeadingSemicolon);
        } else if matches!(out.last(), Some(" " | "\t")) {
            self.warn(AdvisoryKind::SpaceBeforeSemicolon);
        } else if matches!(out.last(), Some(";" | "\n")) {
            self.warn(AdvisoryKind::EmptyStatement);
        }

        self.cursor.advance(1);

        if self.opts.cleanup {
            out.trim_trailing(|f| matches!(f, ";" | " " | "\t" | "\n"));
            if !out.is_empty() {
                out.push(";");
            }
            let fragment = self.expect_newline();
            out.push(&fragment);
        } else {
            out.push(";");
        }
    }

    /// `,`: no space before, exactly one after (unless the line ends).
    fn comma(&mut self, out: &mut Buffer) {
        if self.cursor.prev_char() == Some(' ') {
            self.warn(AdvisoryKind::SpaceBeforeComma);
            if self.opts.cleanup {
                out.trim_trailing_space();
            }
        }

        out.push(",");
        self.cursor.advance(1);

        if !matches!(self.cursor.peek(), Some(' ' | '\n') | None) {
            self.warn(AdvisoryKind::MissingSpaceAfterComma);
        }

        if self.opts.cleanup {
            while matches!(self.cursor.peek(), Some(' ' | '\t')) {
                self.cursor.advance(1);
            }
            if !matches!(self.cursor.peek(), Some('\n') | None) {
                out.push(" ");
            }
        }
    }

    /// An operator from the table: one space on each side, except the tight
    /// set which binds directly to its operand.
    pub(super) fn operator(&mut self, out: &mut Buffer, op: &str) {
        if !is_tight(op) && self.cursor.prev_char() != Some(' ') {
            self.diagnostics
                .report(AdvisoryKind::MissingSpace, self.cursor.position())
                .detail(format!("before `{op}`"))
                .emit();
            if self.opts.cleanup {
                out.push(" ");
            }
        }

        out.push(op);
        self.cursor.advance(op.len());

        if !is_tight(op) {
            let space = self.expect_space(false);
            out.push(&space);
        }
    }

    /// `{`: open a nested block one indent level deeper, through its `}`.
    fn curly_block(&mut self, out: &mut Buffer, level: usize) -> Result<()> {
        if self.opts.cleanup && !out.is_empty() && out.last() != Some(" ") {
            out.push(" ");
        }
        out.push("{");
        self.cursor.advance(1);

        if self.opts.cleanup {
            let previous = self.indent.clone();
            self.indent.push_str(&self.unit);
            let fragment = self.expect_newline();
            out.push(&fragment);
            let body = self.section(level + 1, false)?;
            out.push(&body);
            self.indent = previous;
        } else {
            let body = self.section(level + 1, false)?;
            out.push(&body);
        }

        Ok(())
    }

    /// The `}` that ends a block: dedent the line it lands on by one unit.
    fn end_brace(&mut self, out: &mut Buffer) {
        if self.opts.cleanup {
            out.strip_trailing_unit(&self.unit);
        }
        out.push("}");
        self.cursor.advance(1);
    }

    /// A construct body: either a braced block, or a single statement that
    /// gets braces synthesized around it.
    fn curly_or_statement(
        &mut self,
        out: &mut Buffer,
        level: usize,
        keyword: &'static str,
    ) -> Result<()> {
        if self.cursor.peek() == Some('{') {
            return self.curly_block(out, level);
        }

        self.diagnostics
            .report(AdvisoryKind::MissingBraces, self.cursor.position())
            .detail(format!("after `{keyword}`"))
            .emit();

        if self.opts.cleanup {
            out.push("{");
            out.push(&format!("\n{}{}", self.indent, self.unit));
            let statement = self.section(0, true)?;
            out.push(&statement);
            out.push(&format!("\n{}}}", self.indent));
        } else {
            let statement = self.section(0, true)?;
            out.push(&statement);
            if self.cursor.peek() == Some('\n') {
                out.push("\n");
                self.cursor.advance(1);
            }
        }

        Ok(())
    }

    /// Control construct: keyword, condition (except `else` and `do`),
    /// body. The `if` family then speculatively continues the chain.
    fn keyword_construct(
        &mut self,
        out: &mut Buffer,
        level: usize,
        keyword: &'static str,
    ) -> Result<()> {
        self.enter_nesting()?;
        out.push(keyword);
        self.cursor.advance(keyword.chars().count());
        let space = self.expect_space(true);
        out.push(&space);

        if !matches!(keyword, "else" | "do") {
            if self.cursor.peek() != Some('(') {
                return Err(Error::MissingCondition {
                    keyword,
                    position: self.cursor.position(),
                });
            }
            let condition = self.expression()?;
            out.push(&condition);
            let space = self.expect_space(true);
            out.push(&space);
        }

        self.curly_or_statement(out, level, keyword)?;

        if matches!(keyword, "if" | "elseif" | "else if") {
            self.try_else_chain(out, level)?;
        }

        self.exit_nesting();
        Ok(())
    }

    /// After an `if` body, the next word may continue the chain. Checkpoint
    /// cursor, output, and diagnostics; commit on `else`/`elseif`, roll all
    /// three back otherwise.
    fn try_else_chain(&mut self, out: &mut Buffer, level: usize) -> Result<()> {
        let mark = self.cursor.checkpoint(out.len());
        let diagnostics_mark = self.diagnostics.len();

        let space = self.expect_space(true);
        out.push(&space);

        if let Some(keyword @ ("else if" | "elseif" | "else")) = self.match_keyword() {
            return self.keyword_construct(out, level, keyword);
        }

        self.cursor.restore(&mark);
        out.truncate(mark.output_len());
        self.diagnostics.truncate(diagnostics_mark);
        Ok(())
    }

    /// `function`: anonymous (`function ($x)`) or named, then exactly one
    /// braced body. Named definitions go through the function resolver.
    fn function_construct(&mut self, out: &mut Buffer, level: usize) -> Result<()> {
        self.enter_nesting()?;
        out.push("function");
        self.cursor.advance(8);
        let space = self.expect_space(true);
        out.push(&space);

        if self.cursor.peek() == Some('(') {
            let params = self.expression()?;
            out.push(&params);
            let space = self.expect_space(true);
            out.push(&space);
        } else {
            let start = self.cursor.position();
            let raw = self.word();
            let name = self.resolve_function(&raw, start);
            out.push(&name);

            // The gap between name and parameter list carries no advisory.
            while let Some(c @ (' ' | '\t' | '\n')) = self.cursor.peek() {
                self.cursor.advance(1);
                if !self.opts.cleanup {
                    out.push_char(c);
                }
            }

            if self.cursor.peek() != Some('(') {
                return Err(Error::MissingParameterList {
                    position: self.cursor.position(),
                });
            }
            let params = self.expression()?;
            out.push(&params);
        }

        loop {
            match self.cursor.peek() {
                Some('{') => {
                    self.curly_block(out, level)?;
                    break;
                }
                Some(c @ (' ' | '\t' | '\n')) => {
                    self.cursor.advance(1);
                    if !self.opts.cleanup {
                        out.push_char(c);
                    }
                }
                Some(_) => {
                    return Err(Error::MissingFunctionBody {
                        position: self.cursor.position(),
                    });
                }
                None => {
                    return Err(Error::Unterminated {
                        construct: Construct::FunctionBody,
                        position: self.cursor.position(),
                    });
                }
            }
        }

        self.exit_nesting();
        Ok(())
    }

    fn resolve_function(&mut self, name: &str, start: Position) -> String {
        if is_obfuscated_word(name) {
            if let Some(resolver) = self.function_resolver {
                if let Some(resolved) = resolver.resolve(name) {
                    return resolved.to_string();
                }
            }
            if self.unresolved.insert(name.to_string()) {
                self.diagnostics
                    .report(AdvisoryKind::UnresolvedFunction, start)
                    .detail(name)
                    .emit();
            }
        }
        name.to_string()
    }
}

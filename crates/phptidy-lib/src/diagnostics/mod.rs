//! Non-fatal diagnostics collected during a parse.
//!
//! Advisories record formatting and naming anomalies (missing spaces, odd
//! indentation, unresolved identifiers). They never abort the parse; in
//! cleanup mode most of them are silently corrected in the output and the
//! advisory only documents what was fixed.

mod printer;


pub use printer::{DiagnosticsPrinter, render_fatal};

use crate::cursor::Position;

/// Advisory kinds, one per formatting rule that can be violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryKind {
    ExtraBlankLine,
    InconsistentIndentation,
    TabInsteadOfSpace,
    MissingSpace,
    SpaceBeforeComma,
    MissingSpaceAfterComma,
    SpaceBeforeSemicolon,
    EmptyStatement,
    LeadingSemicolon,
    MissingBraces,
    UnresolvedVariable,
    UnresolvedFunction,
}

impl AdvisoryKind {
    /// Base message, used when the call site adds no detail.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ExtraBlankLine => "extra blank line",
            Self::InconsistentIndentation => "indentation does not match the nesting level",
            Self::TabInsteadOfSpace => "expected a space, got a tab",
            Self::MissingSpace => "expected a space",
            Self::SpaceBeforeComma => "space before `,`",
            Self::MissingSpaceAfterComma => "no space after `,`",
            Self::SpaceBeforeSemicolon => "space before `;`",
            Self::EmptyStatement => "`;` without a statement",
            Self::LeadingSemicolon => "`;` at the start of a block",
            Self::MissingBraces => "body without braces",
            Self::UnresolvedVariable => "variable not in the rename map",
            Self::UnresolvedFunction => "function not in the rename map",
        }
    }

    /// Render the final message, appending call-site detail when present.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => match self {
                Self::UnresolvedVariable => format!("`{detail}` is not in the rename map"),
                Self::UnresolvedFunction => format!("`{detail}` is not in the rename map"),
                _ => format!("{} {}", self.fallback_message(), detail),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub position: Position,
    pub message: String,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning at {}: {}", self.position, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    advisories: Vec<Advisory>,
}

#[must_use = "advisory not recorded, call .emit()"]
pub struct AdvisoryBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    advisory: Advisory,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an advisory with the kind's default message. Call
    /// [`AdvisoryBuilder::detail`] to append context before emitting.
    pub fn report(&mut self, kind: AdvisoryKind, position: Position) -> AdvisoryBuilder<'_> {
        AdvisoryBuilder {
            advisory: Advisory {
                kind,
                position,
                message: kind.fallback_message().to_string(),
            },
            diagnostics: self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Advisory> {
        self.advisories.iter()
    }

    /// Drop advisories recorded after `len`. Used when a speculative parse
    /// rolls back: advisories raised inside the abandoned attempt would
    /// otherwise duplicate those of the re-parse.
    pub fn truncate(&mut self, len: usize) {
        self.advisories.truncate(len);
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }
}

impl<'a> AdvisoryBuilder<'a> {
    pub fn detail(mut self, detail: impl AsRef<str>) -> Self {
        self.advisory.message = self.advisory.kind.message(Some(detail.as_ref()));
        self
    }

    pub fn emit(self) {
        self.diagnostics.advisories.push(self.advisory);
    }
}

//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use super::Diagnostics;
use crate::Error;

/// Renders advisories (and fatal errors) against the source text with a
/// caret at the offending position.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let renderer = renderer(self.colored);
        for (i, advisory) in self.diagnostics.iter().enumerate() {
            let span = caret_span(advisory.position.offset, source.len());

            let mut snippet = Snippet::source(source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(span)
                    .label(&advisory.message),
            );
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let report = [Level::WARNING
                .primary_title(&advisory.message)
                .element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, advisory) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", advisory)?;
        }
        Ok(())
    }
}

/// Render a fatal parse error with the consumed prefix in view and a caret
/// at the failure point.
pub fn render_fatal(source: &str, path: Option<&str>, error: &Error, colored: bool) -> String {
    let message = error.to_string();
    let span = caret_span(error.position().offset, source.len());

    let mut snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(span).label(&message));
    if let Some(p) = path {
        snippet = snippet.path(p);
    }

    let report = [Level::ERROR.primary_title(&message).element(snippet)];
    format!("{}", renderer(colored).render(&report))
}

fn renderer(colored: bool) -> Renderer {
    if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    }
}

/// A one-byte span at `offset`, clamped to the source length so positions
/// at end of input still render.
fn caret_span(offset: usize, limit: usize) -> std::ops::Range<usize> {
    let start = offset.min(limit.saturating_sub(1));
    start..(start + 1).min(limit)
}

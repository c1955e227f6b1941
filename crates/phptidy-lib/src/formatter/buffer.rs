//! Fragment buffer for formatted output.
//!
//! Output is accumulated as a list of string fragments rather than one
//! string: rollback truncates to a fragment count, and several formatting
//! rules correct the most recent fragments (trailing-space trim before `;`,
//! indent-unit strip before `}`) instead of re-emitting them.

#[derive(Debug, Default)]
pub(crate) struct Buffer {
    fragments: Vec<String>,
}

impl Buffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Append a fragment. Empty fragments are dropped so that rules can
    /// push the result of an expectation unconditionally.
    pub(crate) fn push(&mut self, fragment: &str) {
        if !fragment.is_empty() {
            self.fragments.push(fragment.to_string());
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        self.fragments.push(c.to_string());
    }

    pub(crate) fn last(&self) -> Option<&str> {
        self.fragments.last().map(String::as_str)
    }

    pub(crate) fn replace_last(&mut self, fragment: &str) {
        if let Some(last) = self.fragments.last_mut() {
            *last = fragment.to_string();
        }
    }

    /// Truncate to `len` fragments. Rollback support.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.fragments.truncate(len);
    }

    /// Pop trailing fragments while `discard` accepts them.
    pub(crate) fn trim_trailing(&mut self, discard: impl Fn(&str) -> bool) {
        while self.fragments.last().is_some_and(|f| discard(f)) {
            self.fragments.pop();
        }
    }

    pub(crate) fn trim_trailing_space(&mut self) {
        self.trim_trailing(|f| matches!(f, " " | "\t"));
    }

    /// Remove one indent unit from the end of the last fragment, if it ends
    /// with one. Dedents the line a closing brace lands on.
    pub(crate) fn strip_trailing_unit(&mut self, unit: &str) {
        if unit.is_empty() {
            return;
        }
        if let Some(last) = self.fragments.last_mut() {
            if last.ends_with(unit) {
                let stripped = last.len() - unit.len();
                last.truncate(stripped);
            }
        }
    }

    pub(crate) fn concat(&self) -> String {
        self.fragments.concat()
    }
}

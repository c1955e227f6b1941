//! Character cursor over the input text.
//!
//! The cursor owns the input as a `Vec<char>` so that single-character
//! stepping (forward and backward) is O(1) regardless of UTF-8 width. A
//! parallel byte offset is maintained for diagnostic spans into the original
//! source string.

/// A location in the input.
///
/// `offset` is a byte offset into the original source; `line` is 1-based;
/// `column` counts characters since the last newline (0 right after one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Snapshot of cursor state plus the output length at checkpoint time.
///
/// Created at the entry of a speculative parse and consumed by either commit
/// (drop) or rollback (restore the cursor, truncate the output). Checkpoints
/// nest with stack discipline: an else-chain attempt can itself contain
/// nested attempts.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
    offset: usize,
    line: u32,
    column: u32,
    output_len: usize,
}

impl Checkpoint {
    pub fn output_len(&self) -> usize {
        self.output_len
    }
}

#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    offset: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// The next unconsumed character, if any.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Lookahead `n` characters past the current position.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    /// The character immediately before the current position, if any.
    /// Used by spacing rules that inspect the raw input, not the output.
    pub fn prev_char(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i)).copied()
    }

    /// Consume and return one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance(1);
        Some(c)
    }

    /// Move forward by `n` characters, clamping silently at end of input.
    /// Line and column are updated for every character crossed.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            let Some(&c) = self.chars.get(self.pos) else {
                return;
            };
            self.pos += 1;
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    /// Move backward by `n` characters, clamping silently at the start.
    /// The symmetric inverse of [`Cursor::advance`].
    pub fn retreat(&mut self, n: usize) {
        for _ in 0..n {
            let Some(i) = self.pos.checked_sub(1) else {
                return;
            };
            self.pos = i;
            let c = self.chars[i];
            self.offset -= c.len_utf8();
            if c == '\n' {
                self.line -= 1;
                self.column = self.chars[..i]
                    .iter()
                    .rev()
                    .take_while(|&&p| p != '\n')
                    .count() as u32;
            } else {
                self.column = self.column.saturating_sub(1);
            }
        }
    }

    /// Whether the unconsumed input starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let mut i = self.pos;
        for c in prefix.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// The first of `candidates` that prefixes the unconsumed input.
    ///
    /// Candidates are tried in order, so tables that contain both `===` and
    /// `==` must list the longer form first.
    pub fn starts_with<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.has_prefix(c))
    }

    /// Prefix match with a word boundary after it: `prefix` must not be
    /// followed by an identifier character. `while(` matches `while`;
    /// `whilelse` does not.
    pub fn has_word_prefix(&self, prefix: &str) -> bool {
        self.has_prefix(prefix)
            && !self
                .peek_at(prefix.chars().count())
                .is_some_and(is_word_char)
    }

    pub fn checkpoint(&self, output_len: usize) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            offset: self.offset,
            line: self.line,
            column: self.column,
            output_len,
        }
    }

    /// Restore the cursor to `checkpoint`. The caller is responsible for
    /// truncating its output buffer to [`Checkpoint::output_len`].
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.pos = checkpoint.pos;
        self.offset = checkpoint.offset;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }
}

/// Identifier characters: ASCII letters, digits, underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

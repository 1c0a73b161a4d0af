//! Line cursor over captured tool output

/// Index-based cursor over the lines of a text block
///
/// Lines are split on `\n` (a trailing `\r` is dropped). Blank lines are kept
/// so that lookahead sees exactly what the tool printed; callers decide when
/// to skip them.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor positioned on the first line of `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Line `k` positions ahead of the cursor (`peek(0)` is the current line)
    pub fn peek(&self, k: usize) -> Option<&'a str> {
        self.lines.get(self.pos.checked_add(k)?).copied()
    }

    /// Move the cursor forward by `k` lines, stopping at the end of input
    pub fn advance(&mut self, k: usize) {
        self.pos = self.pos.saturating_add(k).min(self.lines.len());
    }

    /// Take the current line and move past it
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek(0)?;
        self.advance(1);
        Some(line)
    }

    /// Index of the current line
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every line has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

/// True for empty or whitespace-only lines
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let cursor = LineCursor::new("");
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.peek(0), None);
    }

    #[test]
    fn test_peek_and_advance() {
        let mut cursor = LineCursor::new("a\nb\n\nc\n");
        assert_eq!(cursor.peek(0), Some("a"));
        assert_eq!(cursor.peek(2), Some(""));
        assert_eq!(cursor.peek(4), None);

        cursor.advance(3);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.next_line(), Some("c"));
        assert!(cursor.is_exhausted());

        cursor.advance(10);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_crlf_lines() {
        let mut cursor = LineCursor::new("image: a.img\r\nfile format: raw\r\n");
        assert_eq!(cursor.next_line(), Some("image: a.img"));
        assert_eq!(cursor.next_line(), Some("file format: raw"));
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t "));
        assert!(!is_blank(" x "));
    }
}

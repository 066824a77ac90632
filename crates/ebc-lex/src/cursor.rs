//! Byte cursor over source text, tracking 1-based line/column.
//!
//! Trimmed to ASCII since every Eightebed lexeme is ASCII; source text need
//! not decode beyond a byte slice.

pub struct Cursor<'a> {
    source: &'a [u8],
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current byte, or `\0` at end of input.
    pub fn current(&self) -> u8 {
        self.source.get(self.position).copied().unwrap_or(0)
    }

    /// Advance one byte, accepting both LF and CRLF line endings.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let c = self.current();
        self.position += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if c == b'\r' {
            // Column stays put; the following '\n' (if any) will advance the line.
        } else {
            self.column += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.advance();
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.advance(); // consumes '\n'
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
    }

    #[test]
    fn crlf_counts_as_one_newline() {
        let mut cursor = Cursor::new("a\r\nb");
        cursor.advance(); // 'a'
        cursor.advance(); // '\r'
        assert_eq!(cursor.line(), 1);
        cursor.advance(); // '\n'
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
    }
}

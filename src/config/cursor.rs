//! Character-level cursor over slideshow configuration text.
//!
//! The grammar has no separate tokenizer: every rule is composed from the
//! primitives here, which track a 1-based line/column for diagnostics.

use crate::config::error::{ParseError, ParseResult};
use crate::foundation::core::{SourcePos, Vec2};

/// How a `key = value` assignment must end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AssignmentTerminator {
    /// Trailing spaces are consumed; the newline is left for the caller.
    #[default]
    Lenient,
    /// Trailing spaces are consumed and a newline is then required.
    RequireNewline,
}

/// Position inside the configuration text, exclusively owned by one parse.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.src.len()
    }

    /// Current byte, or `0` at end of input.
    pub fn peek(&self) -> u8 {
        self.src.as_bytes().get(self.offset).copied().unwrap_or(0)
    }

    /// Full character at the cursor, for diagnostics.
    pub fn peek_char(&self) -> Option<char> {
        self.src.get(self.offset..).and_then(|s| s.chars().next())
    }

    fn rest(&self) -> &'a [u8] {
        self.src.as_bytes().get(self.offset..).unwrap_or(&[])
    }

    /// Returns the current byte and moves past it.
    ///
    /// Stepping onto the one-past-end slot is allowed (and yields `0`); any
    /// further step fails with [`ParseError::UnexpectedEnd`].
    pub fn advance(&mut self) -> ParseResult<u8> {
        if self.offset > self.src.len() {
            return Err(ParseError::UnexpectedEnd { pos: self.pos() });
        }
        let c = self.peek();
        self.offset += 1;

        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if c & 0xC0 != 0x80 {
            // UTF-8 continuation bytes do not start a new column.
            self.column += 1;
        }
        Ok(c)
    }

    fn advance_n(&mut self, count: usize) -> ParseResult<()> {
        for _ in 0..count {
            self.advance()?;
        }
        Ok(())
    }

    /// Consumes blanks (space, tab, carriage return) and, when asked, newlines.
    pub fn skip_whitespace(&mut self, include_newlines: bool) {
        while !self.at_end() {
            match self.peek() {
                b' ' | b'\t' | b'\r' => {}
                b'\n' if include_newlines => {}
                _ => return,
            }
            // Cannot fail: not at end.
            let _ = self.advance();
        }
    }

    /// Requires `literal` verbatim at the cursor and moves past it.
    pub fn expect(&mut self, literal: &str) -> ParseResult<()> {
        if !self.rest().starts_with(literal.as_bytes()) {
            return Err(ParseError::ExpectedToken {
                expected: literal.to_string(),
                pos: self.pos(),
            });
        }
        self.advance_n(literal.len())
    }

    /// Consumes `word` only when it is followed by a non-alphanumeric byte or
    /// end of input, so `image` never matches the front of `imageDir`.
    pub fn try_consume_word(&mut self, word: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(word.as_bytes()) {
            return false;
        }
        if rest
            .get(word.len())
            .is_some_and(|after| after.is_ascii_alphanumeric())
        {
            return false;
        }
        self.advance_n(word.len()).is_ok()
    }

    /// `-`? digits (`.` digits?)? with no exponent and no leading `+`.
    pub fn read_float(&mut self) -> ParseResult<f64> {
        let negative = self.peek() == b'-';
        if negative {
            self.advance()?;
        }

        let mut value = 0.0f64;
        let mut valid = false;
        while !self.at_end() && self.peek().is_ascii_digit() {
            valid = true;
            let digit = self.advance()? - b'0';
            value = value * 10.0 + f64::from(digit);
        }
        if !valid {
            return Err(ParseError::ExpectedNumber { pos: self.pos() });
        }

        if self.peek() == b'.' {
            self.advance()?;
            let mut scale = 0.1f64;
            while !self.at_end() && self.peek().is_ascii_digit() {
                let digit = self.advance()? - b'0';
                value += f64::from(digit) * scale;
                scale *= 0.1;
            }
        }

        Ok(if negative { -value } else { value })
    }

    /// `float , float`, spaces allowed around the comma.
    pub fn read_vec2(&mut self) -> ParseResult<Vec2> {
        let x = self.read_float()?;
        self.skip_whitespace(false);
        self.expect(",")?;
        self.skip_whitespace(false);
        let y = self.read_float()?;
        Ok(Vec2::new(x, y))
    }

    /// Text between double quotes, copied verbatim. There are no escapes:
    /// the first `"` after the opening one closes the string.
    pub fn read_quoted_string(&mut self) -> ParseResult<String> {
        self.expect("\"")?;
        let start = self.offset;
        while !self.at_end() {
            if self.peek() == b'"' {
                let text = self.src.get(start..self.offset).unwrap_or_default();
                self.advance()?;
                return Ok(text.to_string());
            }
            self.advance()?;
        }
        Err(ParseError::UnterminatedString { pos: self.pos() })
    }

    /// `= float` followed by the terminator policy.
    pub fn read_assigned_float(&mut self, terminator: AssignmentTerminator) -> ParseResult<f64> {
        self.expect_assignment()?;
        let value = self.read_float()?;
        self.finish_assignment(terminator)?;
        Ok(value)
    }

    /// `= float, float` followed by the terminator policy.
    pub fn read_assigned_vec2(&mut self, terminator: AssignmentTerminator) -> ParseResult<Vec2> {
        self.expect_assignment()?;
        let value = self.read_vec2()?;
        self.finish_assignment(terminator)?;
        Ok(value)
    }

    /// `= "text"`, used by the directory directives.
    pub fn read_assigned_string(&mut self) -> ParseResult<String> {
        self.expect_assignment()?;
        self.read_quoted_string()
    }

    fn expect_assignment(&mut self) -> ParseResult<()> {
        self.skip_whitespace(false);
        self.expect("=")?;
        self.skip_whitespace(false);
        Ok(())
    }

    fn finish_assignment(&mut self, terminator: AssignmentTerminator) -> ParseResult<()> {
        self.skip_whitespace(false);
        match terminator {
            AssignmentTerminator::Lenient => Ok(()),
            AssignmentTerminator::RequireNewline => self.expect("\n"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/cursor.rs"]
mod tests;

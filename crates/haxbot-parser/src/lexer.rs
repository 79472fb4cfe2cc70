//! Byte cursor with the terminal recognizers the grammar is built from.
//!
//! Every failed terminal is reported to a single furthest-failure
//! accumulator. Failures behind the current furthest position are dropped,
//! failures past it replace the expectation set, ties are added to it.

use crate::error::{Expected, ParseError};

pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

pub(crate) fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

pub(crate) fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    furthest: usize,
    expected: Vec<Expected>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            furthest: 0,
            expected: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn fail(&mut self, expected: Expected) {
        if self.pos < self.furthest {
            return;
        }
        if self.pos > self.furthest {
            self.furthest = self.pos;
            self.expected.clear();
        }
        self.expected.push(expected);
    }

    /// Run `rule`, rewinding to the starting position when it fails.
    pub(crate) fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = rule(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    pub(crate) fn literal(&mut self, lit: &'static str) -> Option<&'static str> {
        if self.input.as_bytes()[self.pos..].starts_with(lit.as_bytes()) {
            self.pos += lit.len();
            Some(lit)
        } else {
            self.fail(Expected::Literal(lit));
            None
        }
    }

    fn class(&mut self, expected: Expected, matches: fn(u8) -> bool) -> Option<u8> {
        match self.peek_byte() {
            Some(b) if matches(b) => {
                self.pos += 1;
                Some(b)
            }
            _ => {
                self.fail(expected);
                None
            }
        }
    }

    /// Zero or more whitespace characters. Returns how many were consumed.
    pub(crate) fn whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.class(Expected::Whitespace, is_whitespace).is_some() {}
        self.pos - start
    }

    /// `Letter (Letter | Digit)*`
    pub(crate) fn identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        self.class(Expected::Letter, is_letter)?;
        loop {
            if self.class(Expected::Letter, is_letter).is_some() {
                continue;
            }
            if self.class(Expected::Digit, is_digit).is_none() {
                break;
            }
        }
        Some(&self.input[start..self.pos])
    }

    /// Succeeds only when the whole input has been consumed.
    pub(crate) fn end(&mut self) -> bool {
        if self.pos == self.input.len() {
            true
        } else {
            self.fail(Expected::EndOfInput);
            false
        }
    }

    pub(crate) fn into_error(self) -> ParseError {
        let found = self.input.get(self.furthest..).and_then(|rest| rest.chars().next());
        ParseError::new(self.expected, found, self.furthest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_advances_on_match() {
        let mut s = Scanner::new("help me");
        assert_eq!(s.literal("help"), Some("help"));
        assert_eq!(s.pos(), 4);
        assert_eq!(s.literal("stop"), None);
        assert_eq!(s.pos(), 4);
    }

    #[test]
    fn whitespace_accepts_empty_and_mixed_runs() {
        let mut s = Scanner::new("x");
        assert_eq!(s.whitespace(), 0);

        let mut s = Scanner::new(" \t\r\n x");
        assert_eq!(s.whitespace(), 5);
        assert_eq!(s.pos(), 5);
    }

    #[test]
    fn identifier_letters_then_digits() {
        let mut s = Scanner::new("big2 rest");
        assert_eq!(s.identifier(), Some("big2"));
        assert_eq!(s.pos(), 4);

        let mut s = Scanner::new("2big");
        assert_eq!(s.identifier(), None);
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn attempt_rewinds_on_failure() {
        let mut s = Scanner::new("go purple");
        let result = s.attempt(|s| {
            s.literal("go")?;
            s.whitespace();
            s.literal("red")
        });
        assert_eq!(result, None);
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn furthest_failure_wins() {
        let mut s = Scanner::new("go purple");
        s.literal("help");
        let _ = s.attempt(|s| {
            s.literal("go")?;
            s.whitespace();
            s.literal("red")
        });
        let err = s.into_error();
        assert_eq!(err.position, 3);
        assert_eq!(err.found, Some('p'));
        assert!(err.expects(Expected::Literal("red")));
        assert!(err.expects(Expected::Whitespace));
        assert!(!err.expects(Expected::Literal("help")));
    }

    #[test]
    fn end_records_expectation() {
        let mut s = Scanner::new("ab");
        s.literal("a");
        assert!(!s.end());
        let err = s.into_error();
        assert_eq!(err.position, 1);
        assert_eq!(err.expected, vec![Expected::EndOfInput]);
    }

    #[test]
    fn found_handles_multibyte_input() {
        let mut s = Scanner::new("!é");
        s.literal("!");
        s.literal("help");
        let err = s.into_error();
        assert_eq!(err.found, Some('é'));
    }
}

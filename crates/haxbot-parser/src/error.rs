use std::fmt;

/// A terminal the parser tried and failed to match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    Literal(&'static str),
    Whitespace,
    Letter,
    Digit,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "\"{lit}\""),
            Self::Whitespace => f.write_str("whitespace"),
            Self::Letter => f.write_str("letter"),
            Self::Digit => f.write_str("digit"),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Parse failure at the furthest position reached by any alternative.
///
/// `position` is a byte offset. Only ASCII is ever consumed, so it is also
/// the character offset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "expected {} but {} found at position {position}",
    describe_expected(.expected),
    describe_found(.found)
)]
pub struct ParseError {
    /// Sorted by description, no duplicates.
    pub expected: Vec<Expected>,
    /// `None` at end of input.
    pub found: Option<char>,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(mut expected: Vec<Expected>, found: Option<char>, position: usize) -> Self {
        expected.sort_by_cached_key(ToString::to_string);
        expected.dedup();
        Self {
            expected,
            found,
            position,
        }
    }

    pub fn expects(&self, expected: Expected) -> bool {
        self.expected.contains(&expected)
    }
}

fn describe_expected(expected: &[Expected]) -> String {
    let descriptions: Vec<String> = expected.iter().map(ToString::to_string).collect();
    match descriptions.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("\"{}\"", c.escape_debug()),
        None => "end of input".to_string(),
    }
}

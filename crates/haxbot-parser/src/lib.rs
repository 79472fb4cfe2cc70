//! Chat command language.
//!
//! A hand-written PEG-style recursive-descent parser for lines such as
//! `!start big` or `!go blue`. On failure the error carries the furthest
//! input position any alternative reached and every terminal that was
//! expected there.

mod error;
mod lexer;
mod parser;

pub use error::{Expected, ParseError};
pub use parser::{capitalize, parse, COMMAND_PREFIX};

//! Errors produced while scanning Go source.

use std::fmt;
use thiserror::Error;

/// 1-based line and byte column of a scan error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Syntax errors. Any of these aborts the run; there is no partial document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0}: string literal not terminated")]
    UnterminatedString(Position),

    #[error("{0}: raw string literal not terminated")]
    UnterminatedRawString(Position),

    #[error("{0}: rune literal not terminated")]
    UnterminatedRune(Position),

    #[error("{0}: comment not terminated")]
    UnterminatedComment(Position),

    #[error("{pos}: invalid character {ch:?}")]
    InvalidChar { ch: char, pos: Position },

    #[error("expected 'package' clause")]
    MissingPackage,

    #[error("{pos}: expected declaration, found '{found}'")]
    ExpectedDeclaration { found: String, pos: Position },

    #[error("{pos}: expected name after '{keyword}'")]
    MissingName { keyword: &'static str, pos: Position },

    #[error("{pos}: unexpected '{found}'")]
    UnbalancedBracket { found: char, pos: Position },

    #[error("{pos}: '{open}' is never closed")]
    UnclosedBracket { open: char, pos: Position },
}

pub type Result<T> = std::result::Result<T, ParseError>;

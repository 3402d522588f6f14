//! Go tokenizer.
//!
//! Produces just enough structure to split a file into top-level
//! declarations: tokens with spans and line info, plus every comment with
//! the number of tokens that precede it (used for comment grouping).

use crate::error::{ParseError, Position, Result};
use crate::model::{Comment, CommentKind, Span};
use regex::Regex;
use std::sync::LazyLock;

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*").unwrap());

// Decimal, hex, octal, binary and float literals, optionally imaginary.
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:0[xX][0-9a-fA-F_]*(?:\.[0-9a-fA-F_]*)?(?:[pP][+-]?[0-9_]+)?",
        r"|0[bB][01_]+",
        r"|0[oO][0-7_]+",
        r"|(?:[0-9][0-9_]*(?:\.[0-9_]*)?|\.[0-9][0-9_]*)(?:[eE][+-]?[0-9_]+)?)i?"
    ))
    .unwrap()
});

/// Operators and punctuation, longest first.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%",
    "&", "|", "^", "<", ">", "=", "!", "~", "(", ")", "[", "]", "{", "}", ",", ";", ".", ":",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifiers and keywords.
    Ident,
    /// Numbers, strings, raw strings and runes.
    Literal,
    Punct,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
    pub end_line: usize,
    /// A newline (or a multi-line block comment) separates this token from
    /// the previous one.
    pub newline_before: bool,
}

/// A comment plus the context needed to group it.
#[derive(Debug, Clone)]
pub struct RawComment {
    pub comment: Comment,
    pub line: usize,
    pub end_line: usize,
    /// Number of tokens emitted before this comment.
    pub tokens_before: usize,
}

pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<RawComment>,
    pub lines: LineIndex,
}

/// Maps byte offsets to 1-based line/column positions.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset)
    }

    pub fn position(&self, offset: usize) -> Position {
        let line = self.line(offset);
        Position {
            line,
            column: offset - self.starts[line - 1] + 1,
        }
    }
}

/// Tokenize Go source text. A leading byte-order mark is skipped.
pub fn lex(text: &str) -> Result<Lexed> {
    let lines = LineIndex::new(text);
    let mut tokens: Vec<Token> = Vec::new();
    let mut comments: Vec<RawComment> = Vec::new();
    let mut newline_before = false;
    let mut pos = if text.starts_with('\u{feff}') { 3 } else { 0 };

    while let Some(ch) = text[pos..].chars().next() {
        let rest = &text[pos..];

        match ch {
            '\n' => {
                newline_before = true;
                pos += 1;
                continue;
            }
            ' ' | '\t' | '\r' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        if rest.starts_with("//") || rest.starts_with("/*") {
            let (kind, len) = if rest.starts_with("//") {
                (CommentKind::Line, rest.find('\n').unwrap_or(rest.len()))
            } else {
                let close = rest[2..]
                    .find("*/")
                    .ok_or_else(|| ParseError::UnterminatedComment(lines.position(pos)))?;
                (CommentKind::Block, close + 4)
            };
            let raw = &rest[..len];
            if kind == CommentKind::Block && raw.contains('\n') {
                newline_before = true;
            }
            comments.push(RawComment {
                comment: Comment {
                    kind,
                    text: raw.to_string(),
                    span: Span::new(pos, pos + len),
                },
                line: lines.line(pos),
                end_line: lines.line(pos + len - 1),
                tokens_before: tokens.len(),
            });
            pos += len;
            continue;
        }

        let (kind, len) = match ch {
            '"' => (
                TokenKind::Literal,
                scan_quoted(rest, '"')
                    .ok_or_else(|| ParseError::UnterminatedString(lines.position(pos)))?,
            ),
            '\'' => (
                TokenKind::Literal,
                scan_quoted(rest, '\'')
                    .ok_or_else(|| ParseError::UnterminatedRune(lines.position(pos)))?,
            ),
            '`' => (
                TokenKind::Literal,
                rest[1..]
                    .find('`')
                    .map(|i| i + 2)
                    .ok_or_else(|| ParseError::UnterminatedRawString(lines.position(pos)))?,
            ),
            _ => {
                if let Some(m) = RE_NUMBER.find(rest).filter(|m| !m.is_empty()) {
                    (TokenKind::Literal, m.end())
                } else if let Some(m) = RE_IDENT.find(rest) {
                    (TokenKind::Ident, m.end())
                } else if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                    (TokenKind::Punct, op.len())
                } else {
                    return Err(ParseError::InvalidChar {
                        ch,
                        pos: lines.position(pos),
                    });
                }
            }
        };

        tokens.push(Token {
            kind,
            span: Span::new(pos, pos + len),
            line: lines.line(pos),
            end_line: lines.line(pos + len - 1),
            newline_before,
        });
        newline_before = false;
        pos += len;
    }

    Ok(Lexed {
        tokens,
        comments,
        lines,
    })
}

/// Length of a `"..."` or `'...'` literal including both quotes, or `None`
/// if it hits a newline or the end of input first.
fn scan_quoted(rest: &str, quote: char) -> Option<usize> {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, '\n')) | None = chars.next() {
                    return None;
                }
            }
            '\n' => return None,
            c if c == quote => return Some(i + c.len_utf8()),
            _ => {}
        }
    }
    None
}

//! Top-level Go declaration scanner.
//!
//! Splits a token stream into statements using Go's automatic semicolon
//! rule, classifies each top-level statement, and attaches doc comments the
//! same way `go/parser` does: a comment group is a declaration's doc when it
//! ends on the line right above the declaration keyword with nothing but
//! whitespace in between.

use super::lexer::{self, Lexed, Token, TokenKind};
use crate::error::{ParseError, Result};
use crate::model::*;
use std::ops::Range;

/// Go keywords. A newline after any of these except the four in
/// [`TERMINATING_KEYWORDS`] does not end a statement.
const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

const TERMINATING_KEYWORDS: &[&str] = &["break", "continue", "fallthrough", "return"];

/// A comment group plus where it sits relative to tokens.
struct Group {
    group: CommentGroup,
    end_line: usize,
    tokens_before: usize,
    /// Starts on the same line as the preceding token; never a doc comment.
    trailing: bool,
}

/// Scan Go source text into a [`SourceFile`].
pub fn parse(text: &str) -> Result<SourceFile> {
    let lexed = lexer::lex(text)?;
    let groups = group_comments(&lexed);
    let statements = split_statements(&lexed, text)?;

    let mut statements = statements.into_iter();
    let package_stmt = statements.next().ok_or(ParseError::MissingPackage)?;
    let toks = &lexed.tokens[package_stmt];
    let package_name = match toks {
        [kw, name] if kw.span.slice(text) == "package" && name.kind == TokenKind::Ident => {
            name.span.slice(text).to_string()
        }
        _ => return Err(ParseError::MissingPackage),
    };
    let package_start = toks[0].span.start;

    let leading_comment = groups
        .first()
        .filter(|g| g.group.end() <= package_start)
        .map(|g| g.group.clone());

    let mut declarations = Vec::new();
    for stmt in statements {
        let doc = doc_comment(&groups, &lexed.tokens, stmt.start);
        declarations.push(parse_declaration(&lexed, text, stmt, doc)?);
    }

    Ok(SourceFile {
        package_name,
        text: text.to_string(),
        leading_comment,
        declarations,
        comments: groups.into_iter().map(|g| g.group).collect(),
    })
}

/// Group adjacent comments following the `go/parser` rules.
///
/// A comment that starts on the line of the previous token opens a trailing
/// group, which only absorbs further comments on that same line. Any other
/// comment opens a lead group, which absorbs comments starting at most one
/// line below the previous comment's end.
fn group_comments(lexed: &Lexed) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for raw in &lexed.comments {
        if let Some(cur) = groups.last_mut() {
            let reach = if cur.trailing { 0 } else { 1 };
            if cur.tokens_before == raw.tokens_before && raw.line <= cur.end_line + reach {
                cur.group.list.push(raw.comment.clone());
                cur.end_line = raw.end_line;
                continue;
            }
        }

        let trailing = raw
            .tokens_before
            .checked_sub(1)
            .map(|i| lexed.tokens[i].end_line == raw.line)
            .unwrap_or(false);
        groups.push(Group {
            group: CommentGroup {
                list: vec![raw.comment.clone()],
            },
            end_line: raw.end_line,
            tokens_before: raw.tokens_before,
            trailing,
        });
    }

    groups
}

/// Find the doc comment for the declaration whose keyword is token `first`.
fn doc_comment(groups: &[Group], tokens: &[Token], first: usize) -> Option<CommentGroup> {
    let keyword_line = tokens[first].line;
    groups
        .iter()
        .rev()
        .find(|g| g.tokens_before == first)
        .filter(|g| !g.trailing && g.end_line + 1 == keyword_line)
        .map(|g| g.group.clone())
}

/// Whether a newline after `tok` inserts a semicolon.
fn ends_statement(tok: &Token, text: &str) -> bool {
    let s = tok.span.slice(text);
    match tok.kind {
        TokenKind::Literal => true,
        TokenKind::Ident => !KEYWORDS.contains(&s) || TERMINATING_KEYWORDS.contains(&s),
        TokenKind::Punct => matches!(s, "++" | "--" | ")" | "]" | "}"),
    }
}

fn closing(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Split the token stream into top-level statements, returned as token
/// index ranges. Checks bracket balance along the way.
fn split_statements(lexed: &Lexed, text: &str) -> Result<Vec<Range<usize>>> {
    let tokens = &lexed.tokens;
    let mut statements = Vec::new();
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut start = 0;

    for (i, tok) in tokens.iter().enumerate() {
        if stack.is_empty() && i > start && tok.newline_before && ends_statement(&tokens[i - 1], text)
        {
            statements.push(start..i);
            start = i;
        }

        let s = tok.span.slice(text);
        match s {
            "(" | "[" | "{" => stack.push((s.chars().next().unwrap_or('('), tok.span.start)),
            ")" | "]" | "}" => {
                let found = s.chars().next().unwrap_or(')');
                match stack.pop() {
                    Some((open, _)) if closing(open) == found => {}
                    _ => {
                        return Err(ParseError::UnbalancedBracket {
                            found,
                            pos: lexed.lines.position(tok.span.start),
                        })
                    }
                }
            }
            ";" if stack.is_empty() => {
                if i > start {
                    statements.push(start..i);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    if let Some(&(open, offset)) = stack.last() {
        return Err(ParseError::UnclosedBracket {
            open,
            pos: lexed.lines.position(offset),
        });
    }
    if start < tokens.len() {
        statements.push(start..tokens.len());
    }
    Ok(statements)
}

fn parse_declaration(
    lexed: &Lexed,
    text: &str,
    stmt: Range<usize>,
    doc: Option<CommentGroup>,
) -> Result<Declaration> {
    let toks = &lexed.tokens[stmt];
    let first = &toks[0];
    let span = Span::new(first.span.start, toks[toks.len() - 1].span.end);
    let pos = |tok: &Token| lexed.lines.position(tok.span.start);

    match first.span.slice(text) {
        "type" => {
            // `type Name ...` or `type ( Name ...; ... )`
            let name_tok = match toks.get(1) {
                Some(t) if t.span.slice(text) == "(" => toks.get(2),
                other => other,
            };
            let name = name_tok
                .filter(|t| t.kind == TokenKind::Ident)
                .map(|t| t.span.slice(text).to_string())
                .ok_or(ParseError::MissingName {
                    keyword: "type",
                    pos: pos(first),
                })?;
            Ok(Declaration::Type(TypeDecl { name, span, doc }))
        }
        "func" => {
            let mut i = 1;
            if toks.get(i).map(|t| t.span.slice(text)) == Some("(") {
                i = skip_group(toks, i, text);
            }
            let name = toks
                .get(i)
                .filter(|t| t.kind == TokenKind::Ident)
                .map(|t| t.span.slice(text).to_string())
                .ok_or(ParseError::MissingName {
                    keyword: "func",
                    pos: pos(first),
                })?;
            let signature = signature_span(&toks[i + 1..], text);
            Ok(Declaration::Function(FuncDecl {
                name,
                signature,
                doc,
            }))
        }
        kw @ ("import" | "const" | "var") => Ok(Declaration::Other(OtherDecl {
            keyword: kw.to_string(),
            span,
        })),
        found => Err(ParseError::ExpectedDeclaration {
            found: found.to_string(),
            pos: pos(first),
        }),
    }
}

/// Index just past the bracket group opening at `open`.
fn skip_group(toks: &[Token], open: usize, text: &str) -> usize {
    let mut depth = 0usize;
    for (i, tok) in toks.iter().enumerate().skip(open) {
        match tok.span.slice(text) {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    toks.len()
}

/// Span from the type parameters or parameters up to (not including) the
/// function body. `{` after `struct` or `interface` belongs to a type literal
/// in the result list.
fn signature_span(toks: &[Token], text: &str) -> Option<Span> {
    let first = toks.first()?;
    let mut depth = 0usize;
    let mut end = toks.len();

    for (i, tok) in toks.iter().enumerate() {
        match tok.span.slice(text) {
            "{" if depth == 0 => {
                let type_literal =
                    i > 0 && matches!(toks[i - 1].span.slice(text), "struct" | "interface");
                if !type_literal {
                    end = i;
                    break;
                }
                depth += 1;
            }
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    let last = toks[..end].last()?;
    Some(Span::new(first.span.start, last.span.end))
}

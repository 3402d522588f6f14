//! Data model for a scanned Go source file — read-only once built.

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slice the span out of `text`. Out-of-range spans yield "".
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Complete scan result for a single `.go` file.
#[derive(Debug, Default)]
pub struct SourceFile {
    pub package_name: String,
    /// Original source text; all spans index into it.
    pub text: String,
    /// File-level comment group found before the `package` clause.
    pub leading_comment: Option<CommentGroup>,
    pub declarations: Vec<Declaration>,
    /// Every comment group in source order.
    pub comments: Vec<CommentGroup>,
}

impl SourceFile {
    pub fn slice(&self, span: Span) -> &str {
        span.slice(&self.text)
    }
}

/// A top-level declaration.
#[derive(Debug)]
pub enum Declaration {
    Type(TypeDecl),
    Function(FuncDecl),
    Other(OtherDecl),
}

impl Declaration {
    /// Attached doc comment, if the declaration kind carries one.
    pub fn doc(&self) -> Option<&CommentGroup> {
        match self {
            Declaration::Type(t) => t.doc.as_ref(),
            Declaration::Function(f) => f.doc.as_ref(),
            Declaration::Other(_) => None,
        }
    }
}

/// `type Name ...` or `type ( Name ...; ... )`.
#[derive(Debug)]
pub struct TypeDecl {
    /// Name of the first type spec.
    pub name: String,
    /// From the `type` keyword to the end of the declaration.
    pub span: Span,
    pub doc: Option<CommentGroup>,
}

/// `func [recv] Name[T](params) results { ... }`.
#[derive(Debug)]
pub struct FuncDecl {
    pub name: String,
    /// Type parameters, parameters and results — no receiver, name or body.
    pub signature: Option<Span>,
    pub doc: Option<CommentGroup>,
}

/// `import`, `const` or `var` declaration.
#[derive(Debug)]
pub struct OtherDecl {
    pub keyword: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A single comment, raw text including delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub span: Span,
}

/// Adjacent comments with no blank line or token between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn end(&self) -> usize {
        self.list.last().map_or(0, |c| c.span.end)
    }
}

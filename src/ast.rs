//! Abstract Syntax Tree types for pixlab commands
//!
//! A command's right-hand side is a single expression. Nodes carry byte spans
//! into the command text so diagnostics can point at the offending part.

use miette::SourceSpan;

use crate::operators::InfixOp;

/// Byte range of an expression within its command text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span<'_>) -> Self {
        Span::new(span.start(), span.end())
    }
}

/// An expression with its location
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal: 0.5, 12, .25
    Number(f64),
    /// Bare name: a registered node, a named resolution, or `pi`
    Ident(String),
    /// Resolution literal `WxH`, halves kept as written until validated
    Resolution { width: String, height: String },
    /// Array literal: [0.5, 0.2, 0.1]
    Array(Vec<Expr>),
    /// Function call: noise(512), blend(a, b), rgb(1, 0, 0)
    Call { name: String, args: Vec<Expr> },
    /// Prefix minus
    Neg(Box<Expr>),
    /// Infix operator application
    Binary {
        op: InfixOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

//! Parse pest pairs into AST nodes

use std::sync::LazyLock;

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::ast::*;
use crate::errors::{PixlabError, Result};
use crate::operators::InfixOp;
use crate::{PixlabParser, Rule};

/// Operator precedence, lowest first. Prefix minus binds tightest.
static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::displace, Assoc::Left))
        .op(Op::infix(Rule::over, Assoc::Left)
            | Op::infix(Rule::under, Assoc::Left)
            | Op::infix(Rule::minimum, Assoc::Left)
            | Op::infix(Rule::maximum, Assoc::Left)
            | Op::infix(Rule::average, Assoc::Left)
            | Op::infix(Rule::difference, Assoc::Left))
        .op(Op::infix(Rule::add, Assoc::Left)
            | Op::infix(Rule::add_alpha, Assoc::Left)
            | Op::infix(Rule::subtract, Assoc::Left)
            | Op::infix(Rule::sub_alpha, Assoc::Left))
        .op(Op::infix(Rule::multiply, Assoc::Left) | Op::infix(Rule::divide, Assoc::Left))
        .op(Op::infix(Rule::power, Assoc::Right) | Op::infix(Rule::gamma, Assoc::Right))
        .op(Op::prefix(Rule::neg))
});

/// Parse one command expression
pub fn parse(source: &str) -> Result<Expr> {
    let pairs =
        PixlabParser::parse(Rule::input, source).map_err(|e| syntax_error(source, e))?;

    let expr = pairs
        .flat_map(|input| input.into_inner())
        .find(|pair| pair.as_rule() == Rule::expr)
        .ok_or_else(|| PixlabError::syntax("empty expression", source, (0, 0).into()))?;

    parse_expr(expr, source)
}

fn syntax_error(source: &str, err: pest::error::Error<Rule>) -> PixlabError {
    let span: SourceSpan = match err.location {
        InputLocation::Pos(pos) => (pos, 0).into(),
        InputLocation::Span((start, end)) => (start, end.saturating_sub(start)).into(),
    };
    PixlabError::syntax(err.variant.message().into_owned(), source, span)
}

fn parse_expr(pair: Pair<Rule>, source: &str) -> Result<Expr> {
    PRATT
        .map_primary(|primary| parse_primary(primary, source))
        .map_prefix(|op, rhs| {
            let rhs = rhs?;
            let span = Span::new(op.as_span().start(), rhs.span.end);
            Ok(Expr::new(ExprKind::Neg(Box::new(rhs)), span))
        })
        .map_infix(|lhs, op, rhs| {
            let (lhs, rhs) = (lhs?, rhs?);
            let op = InfixOp::from_symbol(op.as_str()).ok_or_else(|| {
                PixlabError::syntax(
                    format!("unknown operator `{}`", op.as_str()),
                    source,
                    Span::from(op.as_span()).into(),
                )
            })?;
            let span = Span::new(lhs.span.start, rhs.span.end);
            Ok(Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            ))
        })
        .parse(pair.into_inner())
}

fn parse_primary(pair: Pair<Rule>, source: &str) -> Result<Expr> {
    let span = Span::from(pair.as_span());
    let kind = match pair.as_rule() {
        // Parenthesised sub-expression
        Rule::expr => return parse_expr(pair, source),
        Rule::number => {
            let value = pair.as_str().parse::<f64>().map_err(|e| {
                PixlabError::syntax(format!("invalid number: {e}"), source, span.into())
            })?;
            ExprKind::Number(value)
        }
        Rule::ident | Rule::res_name => ExprKind::Ident(pair.as_str().to_string()),
        Rule::resolution => {
            let mut width = String::new();
            let mut height = String::new();
            for half in pair.into_inner() {
                match half.as_rule() {
                    Rule::res_width => width = half.as_str().to_string(),
                    Rule::res_height => height = half.as_str().to_string(),
                    _ => {}
                }
            }
            ExprKind::Resolution { width, height }
        }
        Rule::array => {
            let elements = pair
                .into_inner()
                .map(|element| parse_expr(element, source))
                .collect::<Result<Vec<_>>>()?;
            ExprKind::Array(elements)
        }
        Rule::call => {
            let mut inner = pair.into_inner();
            let name = inner
                .next()
                .filter(|p| p.as_rule() == Rule::ident)
                .map(|p| p.as_str().to_string())
                .ok_or_else(|| PixlabError::syntax("call without a name", source, span.into()))?;
            let args = inner
                .map(|arg| parse_expr(arg, source))
                .collect::<Result<Vec<_>>>()?;
            ExprKind::Call { name, args }
        }
        rule => {
            return Err(PixlabError::syntax(
                format!("unexpected {rule:?}"),
                source,
                span.into(),
            ));
        }
    };
    Ok(Expr::new(kind, span))
}

//! Expression evaluation
//!
//! One evaluator serves two scopes. Property values evaluate against
//! [`NumericSymbols`], where only numbers and arrays of numbers exist. The
//! graph compiler plugs in its own [`Symbols`] so identifiers resolve to
//! registry nodes, calls build nodes and operators between images blend.

use std::f64::consts::PI;
use std::fmt;

use crate::ast::{Expr, ExprKind};
use crate::errors::{Arity, PixlabError, Result};
use crate::node::NodeRef;
use crate::operators::{BlendMode, InfixOp};
use crate::parse::parse;
use crate::types::Color;

/// An evaluated, not yet coerced value
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    Number(f64),
    Numbers(Vec<f64>),
    Color(Color),
    Node(NodeRef),
}

impl Raw {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Raw::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Number(n) => write!(f, "{n}"),
            Raw::Numbers(items) => {
                write!(f, "an array of {} number", items.len())?;
                if items.len() != 1 {
                    f.write_str("s")?;
                }
                Ok(())
            }
            Raw::Color(color) => write!(f, "color {color}"),
            Raw::Node(node) => write!(f, "node {}", node.borrow().kind().name()),
        }
    }
}

/// Name resolution for one evaluation scope
pub trait Symbols {
    /// Value bound to a bare identifier
    fn constant(&self, name: &str) -> Option<Raw>;

    /// Scope-specific function; `None` when the name is not one of ours.
    ///
    /// Arguments arrive unevaluated so a function can read literal forms
    /// such as resolutions.
    fn call(&self, _name: &str, _args: &[Expr]) -> Option<Result<Raw>> {
        None
    }

    /// Operator between operands that are not both numbers
    fn infix(&self, op: InfixOp, lhs: Raw, rhs: Raw) -> Result<Raw> {
        Err(PixlabError::bad_argument(format!(
            "operator {op} needs two numbers, got {lhs} and {rhs}"
        )))
    }

    /// Error for an identifier with no binding
    fn unbound(&self, name: &str) -> PixlabError {
        PixlabError::UnknownSymbol {
            name: name.to_string(),
        }
    }

    /// Names of scope-specific functions, used for suggestions
    fn function_names(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// Evaluate `expr` in the scope of `symbols`
pub fn evaluate<S: Symbols + ?Sized>(symbols: &S, expr: &Expr) -> Result<Raw> {
    match &expr.kind {
        ExprKind::Number(n) => Ok(Raw::Number(*n)),
        ExprKind::Ident(name) => match symbols.constant(name) {
            Some(value) => Ok(value),
            None if name == "pi" => Ok(Raw::Number(PI)),
            None => Err(symbols.unbound(name)),
        },
        ExprKind::Resolution { width, height } => Err(PixlabError::MisplacedResolution {
            text: format!("{width}x{height}"),
        }),
        ExprKind::Array(items) => {
            let numbers = items
                .iter()
                .map(|item| match evaluate(symbols, item)? {
                    Raw::Number(n) => Ok(n),
                    other => Err(PixlabError::bad_argument(format!(
                        "array elements must be numbers, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Raw::Numbers(numbers))
        }
        ExprKind::Call { name, args } => {
            if let Some(result) = symbols.call(name, args) {
                return result;
            }
            let Some(math) = MathFunction::from_name(name) else {
                return Err(unknown_function(symbols, name));
            };
            if !math.arity().accepts(args.len()) {
                return Err(PixlabError::ArgumentCount {
                    name: name.clone(),
                    expected: math.arity(),
                    got: args.len(),
                });
            }
            let values = args
                .iter()
                .map(|arg| number_arg(symbols, name, arg))
                .collect::<Result<Vec<_>>>()?;
            finite(math.apply(&values)).map(Raw::Number)
        }
        ExprKind::Neg(inner) => match evaluate(symbols, inner)? {
            Raw::Number(n) => Ok(Raw::Number(-n)),
            other => Err(PixlabError::bad_argument(format!("cannot negate {other}"))),
        },
        ExprKind::Binary { op, lhs, rhs } => {
            let lhs = evaluate(symbols, lhs)?;
            let rhs = evaluate(symbols, rhs)?;
            if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
                if let Some(value) = op.numeric(a, b) {
                    if *op == InfixOp::Blend(BlendMode::Divide) && b == 0.0 {
                        return Err(PixlabError::DivisionByZero);
                    }
                    return finite(value).map(Raw::Number);
                }
            }
            symbols.infix(*op, lhs, rhs)
        }
    }
}

fn number_arg<S: Symbols + ?Sized>(symbols: &S, function: &str, arg: &Expr) -> Result<f64> {
    match evaluate(symbols, arg)? {
        Raw::Number(n) => Ok(n),
        other => Err(PixlabError::bad_argument(format!(
            "{function} expects numbers, got {other}"
        ))),
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PixlabError::InvalidNumeric)
    }
}

fn unknown_function<S: Symbols + ?Sized>(symbols: &S, name: &str) -> PixlabError {
    let suggestion = symbols
        .function_names()
        .into_iter()
        .chain(MathFunction::ALL.iter().map(|f| f.name()))
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .map(|candidate| format!("did you mean `{candidate}`?"));
    PixlabError::UnknownFunction {
        name: name.to_string(),
        suggestion,
    }
}

/// Numeric built-ins available in every scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MathFunction {
    Abs,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Floor,
    Ceil,
    Round,
    Min,
    Max,
    Pow,
}

impl MathFunction {
    const ALL: &'static [MathFunction] = &[
        MathFunction::Abs,
        MathFunction::Sqrt,
        MathFunction::Sin,
        MathFunction::Cos,
        MathFunction::Tan,
        MathFunction::Floor,
        MathFunction::Ceil,
        MathFunction::Round,
        MathFunction::Min,
        MathFunction::Max,
        MathFunction::Pow,
    ];

    fn name(self) -> &'static str {
        match self {
            MathFunction::Abs => "abs",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Floor => "floor",
            MathFunction::Ceil => "ceil",
            MathFunction::Round => "round",
            MathFunction::Min => "min",
            MathFunction::Max => "max",
            MathFunction::Pow => "pow",
        }
    }

    fn from_name(name: &str) -> Option<MathFunction> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn arity(self) -> Arity {
        match self {
            MathFunction::Min | MathFunction::Max => Arity::AtLeast(1),
            MathFunction::Pow => Arity::Exactly(2),
            _ => Arity::Exactly(1),
        }
    }

    /// Trigonometry works in radians. Arity is checked by the caller.
    fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or_default();
        match self {
            MathFunction::Abs => x.abs(),
            MathFunction::Sqrt => x.sqrt(),
            MathFunction::Sin => x.sin(),
            MathFunction::Cos => x.cos(),
            MathFunction::Tan => x.tan(),
            MathFunction::Floor => x.floor(),
            MathFunction::Ceil => x.ceil(),
            MathFunction::Round => x.round(),
            MathFunction::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            MathFunction::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            MathFunction::Pow => x.powf(args.get(1).copied().unwrap_or(1.0)),
        }
    }
}

/// Scope for property values: numbers only
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericSymbols;

impl Symbols for NumericSymbols {
    fn constant(&self, _name: &str) -> Option<Raw> {
        None
    }
}

/// Evaluate `text` to a single number
pub fn evaluate_number(text: &str) -> Result<f64> {
    match evaluate(&NumericSymbols, &parse(text)?)? {
        Raw::Number(n) => Ok(n),
        other => Err(PixlabError::bad_argument(format!(
            "expected a number, got {other}"
        ))),
    }
}

/// Evaluate `text` to a list of numbers; a lone number is a list of one.
pub fn evaluate_numbers(text: &str) -> Result<Vec<f64>> {
    match evaluate(&NumericSymbols, &parse(text)?)? {
        Raw::Number(n) => Ok(vec![n]),
        Raw::Numbers(items) => Ok(items),
        other => Err(PixlabError::bad_argument(format!(
            "expected an array of numbers, got {other}"
        ))),
    }
}

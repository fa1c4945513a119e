//! Infix operator table
//!
//! Every blend mode owns one infix symbol; `->` is the displacement operator.
//! The symbol table is built and checked once, on first lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::log::warn;

/// How a blend node combines its two inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Over,
    Under,
    Add,
    AddWithAlpha,
    Subtract,
    SubtractWithAlpha,
    Multiply,
    Divide,
    Power,
    Gamma,
    Difference,
    Maximum,
    Minimum,
    Average,
}

impl BlendMode {
    pub const ALL: [BlendMode; 14] = [
        BlendMode::Over,
        BlendMode::Under,
        BlendMode::Add,
        BlendMode::AddWithAlpha,
        BlendMode::Subtract,
        BlendMode::SubtractWithAlpha,
        BlendMode::Multiply,
        BlendMode::Divide,
        BlendMode::Power,
        BlendMode::Gamma,
        BlendMode::Difference,
        BlendMode::Maximum,
        BlendMode::Minimum,
        BlendMode::Average,
    ];

    /// Enum case ids, in `ALL` order
    pub const NAMES: &'static [&'static str] = &[
        "over",
        "under",
        "add",
        "addWithAlpha",
        "subtract",
        "subtractWithAlpha",
        "multiply",
        "divide",
        "power",
        "gamma",
        "difference",
        "maximum",
        "minimum",
        "average",
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Over => "over",
            BlendMode::Under => "under",
            BlendMode::Add => "add",
            BlendMode::AddWithAlpha => "addWithAlpha",
            BlendMode::Subtract => "subtract",
            BlendMode::SubtractWithAlpha => "subtractWithAlpha",
            BlendMode::Multiply => "multiply",
            BlendMode::Divide => "divide",
            BlendMode::Power => "power",
            BlendMode::Gamma => "gamma",
            BlendMode::Difference => "difference",
            BlendMode::Maximum => "maximum",
            BlendMode::Minimum => "minimum",
            BlendMode::Average => "average",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BlendMode::Over => "&",
            BlendMode::Under => "!&",
            BlendMode::Add => "+",
            BlendMode::AddWithAlpha => "++",
            BlendMode::Subtract => "-",
            BlendMode::SubtractWithAlpha => "--",
            BlendMode::Multiply => "*",
            BlendMode::Divide => "/",
            BlendMode::Power => "**",
            BlendMode::Gamma => "!**",
            BlendMode::Difference => "%",
            BlendMode::Maximum => "><",
            BlendMode::Minimum => "<>",
            BlendMode::Average => "~",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Meaning of an infix symbol between two graph operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Blend(BlendMode),
    Displace,
}

impl InfixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Blend(mode) => mode.symbol(),
            InfixOp::Displace => "->",
        }
    }

    /// Exact-match lookup; no prefix or case folding.
    pub fn from_symbol(symbol: &str) -> Option<InfixOp> {
        OPERATORS.get(symbol).copied()
    }

    /// Plain arithmetic for number-on-number operands, if the symbol has one.
    ///
    /// Division by zero is left to the caller, which reports it.
    pub fn numeric(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            InfixOp::Blend(BlendMode::Add) => Some(lhs + rhs),
            InfixOp::Blend(BlendMode::Subtract) => Some(lhs - rhs),
            InfixOp::Blend(BlendMode::Multiply) => Some(lhs * rhs),
            InfixOp::Blend(BlendMode::Divide) => Some(lhs / rhs),
            InfixOp::Blend(BlendMode::Power) => Some(lhs.powf(rhs)),
            _ => None,
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

static OPERATORS: LazyLock<HashMap<&'static str, InfixOp>> = LazyLock::new(build_table);

fn build_table() -> HashMap<&'static str, InfixOp> {
    let mut table = HashMap::new();
    let ops = BlendMode::ALL
        .into_iter()
        .map(InfixOp::Blend)
        .chain([InfixOp::Displace]);
    for op in ops {
        if let Some(previous) = table.insert(op.symbol(), op) {
            warn!(symbol = op.symbol(), ?previous, "operator symbol bound twice");
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_its_own_symbol() {
        assert_eq!(OPERATORS.len(), BlendMode::ALL.len() + 1);
        for mode in BlendMode::ALL {
            assert_eq!(InfixOp::from_symbol(mode.symbol()), Some(InfixOp::Blend(mode)));
        }
        assert_eq!(InfixOp::from_symbol("->"), Some(InfixOp::Displace));
    }

    #[test]
    fn names_follow_all_order() {
        let names: Vec<_> = BlendMode::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, BlendMode::NAMES);
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(InfixOp::from_symbol("+ "), None);
        assert_eq!(InfixOp::from_symbol("=>"), None);
    }

    #[test]
    fn only_arithmetic_symbols_have_numeric_meaning() {
        assert_eq!(InfixOp::Blend(BlendMode::Add).numeric(2.0, 3.0), Some(5.0));
        assert_eq!(InfixOp::Blend(BlendMode::Power).numeric(2.0, 3.0), Some(8.0));
        assert_eq!(InfixOp::Blend(BlendMode::Over).numeric(2.0, 3.0), None);
        assert_eq!(InfixOp::Displace.numeric(2.0, 3.0), None);
    }
}

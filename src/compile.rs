//! Expression to graph compiler
//!
//! Registry names are bound as constants, every node kind is a constructor
//! function named after it, and the infix operators between images build
//! blend and displace nodes. Whatever the expression evaluates to is coerced
//! to a node, so a successful compile always yields a fully wired graph.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::ast::{Expr, ExprKind};
use crate::coerce::arg_to_pix;
use crate::errors::{Arity, PixlabError, Result};
use crate::eval::{Raw, Symbols, evaluate};
use crate::log::{debug, warn};
use crate::node::{GeneratorKind, MergerEffectKind, Node, NodeKind, NodeRef, PropertyValue};
use crate::operators::InfixOp;
use crate::parse::parse;
use crate::registry::Registry;
use crate::session::SessionConfig;
use crate::types::{Color, Resolution};

/// Resolution name that stands for the session's default
pub const DEFAULT_RESOLUTION: &str = "default";

/// Magnitude of a displacement built with `->`
const OPERATOR_DISPLACEMENT: f64 = 1.0;

/// Functions returning a color value rather than a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFunction {
    Rgb,
    Rgba,
    Hsv,
    Hsva,
}

impl ColorFunction {
    const ALL: [ColorFunction; 4] = [
        ColorFunction::Rgb,
        ColorFunction::Rgba,
        ColorFunction::Hsv,
        ColorFunction::Hsva,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorFunction::Rgb => "rgb",
            ColorFunction::Rgba => "rgba",
            ColorFunction::Hsv => "hsv",
            ColorFunction::Hsva => "hsva",
        }
    }

    /// `None` when the channel count does not match the function.
    fn apply(self, c: &[f64]) -> Option<Color> {
        match (self, c) {
            (ColorFunction::Rgb, &[r, g, b]) => Some(Color::rgb(r, g, b)),
            (ColorFunction::Rgba, &[r, g, b, a]) => Some(Color::rgba(r, g, b, a)),
            (ColorFunction::Hsv, &[h, s, v]) => Some(Color::hsva(h, s, v, 1.0)),
            (ColorFunction::Hsva, &[h, s, v, a]) => Some(Color::hsva(h, s, v, a)),
            _ => None,
        }
    }
}

/// A callable constructor in graph scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructor {
    Node(NodeKind),
    Color(ColorFunction),
}

impl Constructor {
    pub fn name(self) -> &'static str {
        match self {
            Constructor::Node(kind) => kind.name(),
            Constructor::Color(f) => f.name(),
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Constructor::Node(NodeKind::Generator(_) | NodeKind::SingleEffect(_)) => {
                Arity::Exactly(1)
            }
            Constructor::Node(NodeKind::MergerEffect(_)) => Arity::Exactly(2),
            Constructor::Node(NodeKind::MultiEffect(_)) => Arity::AtLeast(1),
            Constructor::Color(ColorFunction::Rgb | ColorFunction::Hsv) => Arity::Exactly(3),
            Constructor::Color(ColorFunction::Rgba | ColorFunction::Hsva) => Arity::Exactly(4),
        }
    }

    /// Exact-match lookup
    pub fn lookup(name: &str) -> Option<Constructor> {
        CONSTRUCTORS.get(name).copied()
    }
}

static CONSTRUCTORS: LazyLock<HashMap<&'static str, Constructor>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    let all = NodeKind::all()
        .map(Constructor::Node)
        .chain(ColorFunction::ALL.into_iter().map(Constructor::Color));
    for ctor in all {
        if let Some(previous) = table.insert(ctor.name(), ctor) {
            warn!(name = ctor.name(), ?previous, "constructor name bound twice");
        }
    }
    table
});

/// Graph-scope symbols: the registry snapshot plus constructors
pub struct GraphSymbols<'a> {
    registry: &'a Registry,
    config: &'a SessionConfig,
}

impl<'a> GraphSymbols<'a> {
    pub fn new(registry: &'a Registry, config: &'a SessionConfig) -> Self {
        Self { registry, config }
    }

    fn construct(&self, ctor: Constructor, args: &[Expr]) -> Result<Raw> {
        if !ctor.arity().accepts(args.len()) {
            return Err(PixlabError::ArgumentCount {
                name: ctor.name().to_string(),
                expected: ctor.arity(),
                got: args.len(),
            });
        }

        let node = match ctor {
            Constructor::Color(f) => {
                let channels = args
                    .iter()
                    .map(|arg| match evaluate(self, arg)? {
                        Raw::Number(n) => Ok(n),
                        other => Err(PixlabError::bad_argument(format!(
                            "{} takes numbers, got {other}",
                            f.name()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                let color = f.apply(&channels).ok_or_else(|| PixlabError::ArgumentCount {
                    name: f.name().to_string(),
                    expected: ctor.arity(),
                    got: channels.len(),
                })?;
                return Ok(Raw::Color(color));
            }
            Constructor::Node(NodeKind::Generator(kind)) => {
                let resolution = self.resolution_arg(kind, &args[0])?;
                Node::generator(kind, resolution)
            }
            Constructor::Node(NodeKind::SingleEffect(kind)) => {
                Node::single(kind, self.pix(&args[0])?)
            }
            Constructor::Node(NodeKind::MergerEffect(kind)) => {
                Node::merger(kind, self.pix(&args[0])?, self.pix(&args[1])?)
            }
            Constructor::Node(NodeKind::MultiEffect(kind)) => {
                let inputs = args
                    .iter()
                    .map(|arg| self.pix(arg))
                    .collect::<Result<Vec<_>>>()?;
                Node::multi(kind, inputs).ok_or_else(|| PixlabError::ArgumentCount {
                    name: kind.name().to_string(),
                    expected: Arity::AtLeast(1),
                    got: 0,
                })?
            }
        };
        debug!(kind = node.kind().name(), "built node");
        Ok(Raw::Node(node.into()))
    }

    fn pix(&self, arg: &Expr) -> Result<NodeRef> {
        arg_to_pix(evaluate(self, arg)?, self.config)
    }

    /// A generator's argument: `WxH`, a side length, or a resolution name.
    ///
    /// A registered node name shadows a resolution name of the same spelling.
    fn resolution_arg(&self, kind: GeneratorKind, arg: &Expr) -> Result<Resolution> {
        match &arg.kind {
            ExprKind::Resolution { width, height } => Resolution::from_parts(width, height),
            ExprKind::Ident(name) if !self.registry.contains(name) => {
                if name == DEFAULT_RESOLUTION {
                    return Ok(self.config.default_resolution);
                }
                Resolution::named(name).ok_or_else(|| PixlabError::UnknownResolution {
                    name: name.clone(),
                    known: known_resolutions(),
                })
            }
            _ => match evaluate(self, arg)? {
                Raw::Number(side) => Resolution::from_side(side),
                other => Err(PixlabError::bad_argument(format!(
                    "{} needs a resolution, got {other}",
                    kind.name()
                ))),
            },
        }
    }

    fn operator_node(&self, op: InfixOp, a: NodeRef, b: NodeRef) -> Result<Node> {
        let node = match op {
            InfixOp::Blend(mode) => Node::merger(MergerEffectKind::Blend, a, b)
                .with("mode", PropertyValue::Enum(mode.name()))?,
            InfixOp::Displace => Node::merger(MergerEffectKind::Displace, a, b)
                .with("distance", PropertyValue::Float(OPERATOR_DISPLACEMENT))?,
        };
        node.with("placement", PropertyValue::Enum("aspectFill"))?
            .with("extend", PropertyValue::Enum("hold"))
    }
}

impl Symbols for GraphSymbols<'_> {
    fn constant(&self, name: &str) -> Option<Raw> {
        self.registry.get(name).cloned().map(Raw::Node)
    }

    fn call(&self, name: &str, args: &[Expr]) -> Option<Result<Raw>> {
        Constructor::lookup(name).map(|ctor| self.construct(ctor, args))
    }

    fn infix(&self, op: InfixOp, lhs: Raw, rhs: Raw) -> Result<Raw> {
        let a = arg_to_pix(lhs, self.config)?;
        let b = arg_to_pix(rhs, self.config)?;
        let node = self.operator_node(op, a, b)?;
        debug!(operator = op.symbol(), "built operator node");
        Ok(Raw::Node(node.into()))
    }

    fn unbound(&self, name: &str) -> PixlabError {
        PixlabError::NodeNotFound {
            name: name.to_string(),
        }
    }

    fn function_names(&self) -> Vec<&'static str> {
        CONSTRUCTORS.keys().copied().collect()
    }
}

fn known_resolutions() -> String {
    let names: Vec<&str> = std::iter::once(DEFAULT_RESOLUTION)
        .chain(Resolution::NAMED.iter().map(|(name, _)| *name))
        .collect();
    format!("known resolutions: {}", names.join(", "))
}

/// Compile `text` into a node, resolving names against `registry`.
///
/// The registry is only read; registering the result is up to the caller.
pub fn compile(text: &str, registry: &Registry, config: &SessionConfig) -> Result<NodeRef> {
    let expr = parse(text)?;
    let symbols = GraphSymbols::new(registry, config);
    let node = arg_to_pix(evaluate(&symbols, &expr)?, config)?;
    debug!(text, kind = node.borrow().kind().name(), "compiled");
    Ok(node)
}

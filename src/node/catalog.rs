//! Property descriptor catalog
//!
//! Each node kind declares its assignable properties as a static table of
//! (name, kind, default). Nodes store one value per descriptor, in the same
//! order, so declaration order is listing order.

use std::fmt;

use crate::errors::{PixlabError, Result};
use crate::operators::BlendMode;
use crate::types::{Color, Point, Rect, Size};

/// The type of an assignable property; decides how assignment text is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Float,
    Int,
    Bool,
    Point,
    Size,
    Rect,
    Color,
    /// One of a fixed, ordered set of case ids
    Enum(&'static [&'static str]),
}

impl PropertyKind {
    pub fn name(self) -> &'static str {
        match self {
            PropertyKind::Float => "float",
            PropertyKind::Int => "int",
            PropertyKind::Bool => "bool",
            PropertyKind::Point => "point",
            PropertyKind::Size => "size",
            PropertyKind::Rect => "rect",
            PropertyKind::Color => "color",
            PropertyKind::Enum(_) => "enum",
        }
    }
}

/// A property's current value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Point(Point),
    Size(Size),
    Rect(Rect),
    Color(Color),
    Enum(&'static str),
}

impl PropertyValue {
    /// Whether this value may be stored in a property of `kind`
    pub fn fits(&self, kind: PropertyKind) -> bool {
        match (self, kind) {
            (PropertyValue::Float(_), PropertyKind::Float)
            | (PropertyValue::Int(_), PropertyKind::Int)
            | (PropertyValue::Bool(_), PropertyKind::Bool)
            | (PropertyValue::Point(_), PropertyKind::Point)
            | (PropertyValue::Size(_), PropertyKind::Size)
            | (PropertyValue::Rect(_), PropertyKind::Rect)
            | (PropertyValue::Color(_), PropertyKind::Color) => true,
            (PropertyValue::Enum(case), PropertyKind::Enum(cases)) => cases.contains(case),
            _ => false,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Point(v) => write!(f, "{v}"),
            PropertyValue::Size(v) => write!(f, "{v}"),
            PropertyValue::Rect(v) => write!(f, "{v}"),
            PropertyValue::Color(v) => write!(f, "{v}"),
            PropertyValue::Enum(v) => write!(f, ".{v}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub default: PropertyValue,
}

const fn float(name: &'static str, default: f64) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Float,
        default: PropertyValue::Float(default),
    }
}

const fn int(name: &'static str, default: i64) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Int,
        default: PropertyValue::Int(default),
    }
}

const fn boolean(name: &'static str, default: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Bool,
        default: PropertyValue::Bool(default),
    }
}

const fn point(name: &'static str, default: Point) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Point,
        default: PropertyValue::Point(default),
    }
}

const fn size(name: &'static str, default: Size) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Size,
        default: PropertyValue::Size(default),
    }
}

const fn rect(name: &'static str, default: Rect) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Rect,
        default: PropertyValue::Rect(default),
    }
}

const fn color(name: &'static str, default: Color) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Color,
        default: PropertyValue::Color(default),
    }
}

const fn choice(
    name: &'static str,
    cases: &'static [&'static str],
    default: &'static str,
) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        kind: PropertyKind::Enum(cases),
        default: PropertyValue::Enum(default),
    }
}

// ============================================================================
// Enum case sets
// ============================================================================

pub const EXTEND: &[&str] = &["hold", "zero", "repeat", "mirror"];
pub const PLACEMENT: &[&str] = &["fill", "aspectFit", "aspectFill", "center"];
const GRADIENT_DIRECTION: &[&str] = &["horizontal", "vertical", "radial", "angle"];
const BLUR_STYLE: &[&str] = &["box", "gaussian", "angle", "zoom", "random"];
const QUALITY: &[&str] = &["low", "mid", "high"];
const FLIP: &[&str] = &["none", "x", "y", "xy"];
const FLOP: &[&str] = &["none", "left", "right"];
const CLAMP_STYLE: &[&str] = &["hold", "relative", "loop", "mirror"];
const LOOKUP_AXIS: &[&str] = &["x", "y"];
const STACK_AXIS: &[&str] = &["horizontal", "vertical"];
const ALIGNMENT: &[&str] = &["leading", "center", "trailing"];

// ============================================================================
// Generators
// ============================================================================

pub(crate) const COLOR: &[PropertyDescriptor] = &[color("color", Color::WHITE)];

pub(crate) const CIRCLE: &[PropertyDescriptor] = &[
    float("radius", 0.25),
    point("position", Point::ZERO),
    float("edgeRadius", 0.0),
    color("color", Color::WHITE),
    color("backgroundColor", Color::BLACK),
];

pub(crate) const RECTANGLE: &[PropertyDescriptor] = &[
    size("size", Size::new(0.5, 0.5)),
    point("position", Point::ZERO),
    float("cornerRadius", 0.0),
    color("color", Color::WHITE),
    color("backgroundColor", Color::BLACK),
];

pub(crate) const POLYGON: &[PropertyDescriptor] = &[
    int("count", 3),
    float("radius", 0.25),
    float("rotation", 0.0),
    point("position", Point::ZERO),
    color("color", Color::WHITE),
    color("backgroundColor", Color::BLACK),
];

pub(crate) const GRADIENT: &[PropertyDescriptor] = &[
    choice("direction", GRADIENT_DIRECTION, "horizontal"),
    float("scale", 1.0),
    float("offset", 0.0),
    point("position", Point::ZERO),
    choice("extend", EXTEND, "repeat"),
];

pub(crate) const NOISE: &[PropertyDescriptor] = &[
    float("scale", 1.0),
    int("seed", 1),
    int("octaves", 7),
    point("offset", Point::ZERO),
    boolean("colored", false),
    boolean("random", false),
];

// ============================================================================
// Single effects
// ============================================================================

pub(crate) const BLUR: &[PropertyDescriptor] = &[
    float("radius", 0.5),
    choice("style", BLUR_STYLE, "gaussian"),
    choice("quality", QUALITY, "mid"),
    float("angle", 0.0),
    point("position", Point::ZERO),
];

pub(crate) const LEVELS: &[PropertyDescriptor] = &[
    float("brightness", 1.0),
    float("darkness", 0.0),
    float("contrast", 0.0),
    float("gamma", 1.0),
    float("opacity", 1.0),
    boolean("inverted", false),
];

pub(crate) const TRANSFORM: &[PropertyDescriptor] = &[
    point("position", Point::ZERO),
    float("rotation", 0.0),
    float("scale", 1.0),
    size("size", Size::ONE),
];

pub(crate) const CROP: &[PropertyDescriptor] = &[rect("crop", Rect::UNIT)];

pub(crate) const THRESHOLD: &[PropertyDescriptor] =
    &[float("threshold", 0.5), boolean("smooth", true)];

pub(crate) const EDGE: &[PropertyDescriptor] = &[
    float("strength", 10.0),
    float("distance", 1.0),
    boolean("colored", false),
];

pub(crate) const TINT: &[PropertyDescriptor] = &[color("color", Color::WHITE)];

pub(crate) const FLIP_FLOP: &[PropertyDescriptor] =
    &[choice("flip", FLIP, "none"), choice("flop", FLOP, "none")];

pub(crate) const CLAMP: &[PropertyDescriptor] = &[
    float("low", 0.0),
    float("high", 1.0),
    choice("style", CLAMP_STYLE, "hold"),
];

// ============================================================================
// Merger effects
// ============================================================================

pub(crate) const BLEND: &[PropertyDescriptor] = &[
    choice("mode", BlendMode::NAMES, "add"),
    choice("placement", PLACEMENT, "aspectFit"),
    choice("extend", EXTEND, "zero"),
    point("position", Point::ZERO),
    float("rotation", 0.0),
    float("scale", 1.0),
    size("size", Size::ONE),
];

pub(crate) const DISPLACE: &[PropertyDescriptor] = &[
    float("distance", 0.1),
    float("origin", 0.5),
    choice("placement", PLACEMENT, "aspectFit"),
    choice("extend", EXTEND, "zero"),
];

pub(crate) const CROSS: &[PropertyDescriptor] = &[
    float("fraction", 0.5),
    choice("placement", PLACEMENT, "aspectFit"),
    choice("extend", EXTEND, "zero"),
];

pub(crate) const LOOKUP: &[PropertyDescriptor] = &[
    choice("axis", LOOKUP_AXIS, "x"),
    boolean("holdEdge", true),
    choice("placement", PLACEMENT, "aspectFit"),
    choice("extend", EXTEND, "zero"),
];

// ============================================================================
// Multi effects
// ============================================================================

pub(crate) const BLENDS: &[PropertyDescriptor] = &[choice("mode", BlendMode::NAMES, "add")];

pub(crate) const STACK: &[PropertyDescriptor] = &[
    choice("axis", STACK_AXIS, "vertical"),
    choice("alignment", ALIGNMENT, "center"),
    float("spacing", 0.0),
    float("padding", 0.0),
    color("backgroundColor", Color::BLACK),
];

/// Live property values of one node, parallel to its descriptor table
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    descriptors: &'static [PropertyDescriptor],
    values: Vec<PropertyValue>,
}

impl Properties {
    /// Every property at its declared default
    pub fn new(descriptors: &'static [PropertyDescriptor]) -> Self {
        Self {
            descriptors,
            values: descriptors.iter().map(|d| d.default).collect(),
        }
    }

    pub fn descriptors(&self) -> &'static [PropertyDescriptor] {
        self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.index_of(name).map(|i| self.values[i])
    }

    /// Store `value` under `name`; the value must fit the declared kind.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| PixlabError::property_not_found("", name, self.names()))?;
        let descriptor = &self.descriptors[index];
        if !value.fits(descriptor.kind) {
            return Err(PixlabError::bad_argument(format!(
                "{value} is not a valid {} for {name}",
                descriptor.kind.name()
            )));
        }
        self.values[index] = value;
        Ok(())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.name == name)
    }
}

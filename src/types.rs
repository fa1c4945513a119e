//! Strongly-typed values for node properties and literals.
//!
//! Points and sizes are `glam` vectors underneath; colors are linear RGBA in
//! `[0, 1]` stored as a `DVec4`.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, DVec4};

use crate::errors::{PixlabError, ResolutionPart};

/// A position in normalized image space
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct Point(pub DVec2);

impl Point {
    pub const ZERO: Point = Point(DVec2::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Point {
        Point(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x(), self.y())
    }
}

/// A width/height pair in normalized image space
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct Size(pub DVec2);

impl Size {
    pub const ONE: Size = Size(DVec2::ONE);

    #[inline]
    pub const fn new(w: f64, h: f64) -> Size {
        Size(DVec2::new(w, h))
    }

    #[inline]
    pub fn w(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn h(self) -> f64 {
        self.0.y
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.w(), self.h())
    }
}

/// Origin plus size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.origin.x(),
            self.origin.y(),
            self.size.w(),
            self.size.h()
        )
    }
}

/// Linear RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[repr(transparent)]
pub struct Color(pub DVec4);

impl Color {
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color(DVec4::new(r, g, b, a))
    }

    #[inline]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color::rgba(r, g, b, 1.0)
    }

    /// Monochrome, opaque
    #[inline]
    pub const fn gray(lum: f64) -> Color {
        Color::rgba(lum, lum, lum, 1.0)
    }

    #[inline]
    pub const fn gray_alpha(lum: f64, a: f64) -> Color {
        Color::rgba(lum, lum, lum, a)
    }

    /// Hue, saturation and value all in `[0, 1]`; hue wraps.
    pub fn hsva(h: f64, s: f64, v: f64, a: f64) -> Color {
        // rem_euclid can round a tiny negative hue up to exactly 1.0
        let h = h.rem_euclid(1.0) * 6.0;
        let h = if h >= 6.0 { h - 6.0 } else { h };
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Color::rgba(r, g, b, a)
    }

    #[inline]
    pub fn r(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn a(self) -> f64 {
        self.0.w
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.r(), self.g(), self.b(), self.a())
    }
}

/// Pixel dimensions of a generator's output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Resolution {
        Resolution { width, height }
    }

    pub const fn square(side: u32) -> Resolution {
        Resolution::new(side, side)
    }

    /// Standard resolutions, reachable by name as a generator argument
    pub const NAMED: &'static [(&'static str, Resolution)] = &[
        ("square", Resolution::square(1024)),
        ("hd", Resolution::new(1280, 720)),
        ("720p", Resolution::new(1280, 720)),
        ("fullhd", Resolution::new(1920, 1080)),
        ("1080p", Resolution::new(1920, 1080)),
        ("4k", Resolution::new(3840, 2160)),
        ("uhd", Resolution::new(3840, 2160)),
        ("8k", Resolution::new(7680, 4320)),
    ];

    pub fn named(name: &str) -> Option<Resolution> {
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, res)| *res)
    }

    /// Validate the two halves of a `WxH` literal
    pub fn from_parts(width: &str, height: &str) -> Result<Resolution, PixlabError> {
        Ok(Resolution::new(
            parse_dimension(width, ResolutionPart::Width)?,
            parse_dimension(height, ResolutionPart::Height)?,
        ))
    }

    /// A square resolution from an evaluated number; must be a positive integer.
    pub fn from_side(side: f64) -> Result<Resolution, PixlabError> {
        if side.fract() != 0.0 || side < 1.0 || side > u32::MAX as f64 {
            return Err(PixlabError::Resolution {
                part: ResolutionPart::Side,
                text: side.to_string(),
            });
        }
        Ok(Resolution::square(side as u32))
    }
}

fn parse_dimension(text: &str, part: ResolutionPart) -> Result<u32, PixlabError> {
    match text.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PixlabError::Resolution {
            part,
            text: text.to_string(),
        }),
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Accepts `512`, `1920x1080` or a standard name such as `hd`.
impl FromStr for Resolution {
    type Err = PixlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(res) = Resolution::named(s) {
            return Ok(res);
        }
        match s.split_once('x') {
            Some((width, height)) => Resolution::from_parts(width, height),
            None => parse_dimension(s, ResolutionPart::Side).map(Resolution::square),
        }
    }
}

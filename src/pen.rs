//! Paint style for shapes: fill, stroke, width, caps, joins, winding.

use std::fmt;

use crate::defaults;
use crate::log::warn;
use crate::parse::parse_length;

/// An RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Normalize a `fill`/`stroke` attribute value.
///
/// Only hex colors are understood; `none`, empty strings and anything else
/// leave the paint unset.
pub fn normalize_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return None;
    }
    let color = Color::from_hex(value);
    if color.is_none() {
        warn!(value, "unsupported color value, treating as unset");
    }
    color
}

/// Normalize a `stroke-width` attribute value (empty means the default).
pub fn normalize_stroke_width(value: &str) -> f64 {
    if value.trim().is_empty() {
        return defaults::STROKE_WIDTH;
    }
    match parse_length(value) {
        Some(width) if width >= 0.0 => width,
        _ => {
            warn!(value, "invalid stroke-width, using default");
            defaults::STROKE_WIDTH
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

impl LineJoin {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "miter" | "miter-clip" | "arcs" => Some(LineJoin::Miter),
            "round" => Some(LineJoin::Round),
            "bevel" => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

/// Fill rule used for the inside test of closed paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    #[default]
    NonZero,
    EvenOdd,
}

impl Winding {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "nonzero" => Some(Winding::NonZero),
            "evenodd" => Some(Winding::EvenOdd),
            _ => None,
        }
    }

    /// Whether a crossing count / winding number means "inside".
    pub fn is_inside(self, winding_number: i32, crossings: u32) -> bool {
        match self {
            Winding::NonZero => winding_number != 0,
            Winding::EvenOdd => crossings % 2 == 1,
        }
    }
}

/// How a shape is painted. A pen with neither fill nor stroke is invisible.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub winding: Winding,
    pub miter_limit: f64,
    pub opacity: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            width: defaults::STROKE_WIDTH,
            cap: LineCap::default(),
            join: LineJoin::default(),
            winding: Winding::default(),
            miter_limit: defaults::MITER_LIMIT,
            opacity: defaults::OPACITY,
        }
    }
}

impl Pen {
    pub fn new(fill: Option<Color>, stroke: Option<Color>, width: f64) -> Self {
        Self {
            fill,
            stroke,
            width,
            ..Self::default()
        }
    }

    pub fn filled(color: Color) -> Self {
        Self::new(Some(color), None, defaults::STROKE_WIDTH)
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self::new(None, Some(color), width)
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    pub fn is_stroked(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn visible(&self) -> bool {
        self.is_filled() || self.is_stroked()
    }

    /// Apply one presentation attribute. Returns false if `key` is not a pen
    /// attribute.
    pub fn apply_attribute(&mut self, key: &str, value: &str) -> bool {
        match key {
            "fill" => self.fill = normalize_color(value),
            "stroke" => self.stroke = normalize_color(value),
            "stroke-width" => self.width = normalize_stroke_width(value),
            "stroke-linecap" => self.cap = LineCap::from_attr(value).unwrap_or_default(),
            "stroke-linejoin" => self.join = LineJoin::from_attr(value).unwrap_or_default(),
            "stroke-miterlimit" => {
                self.miter_limit = parse_length(value).unwrap_or(defaults::MITER_LIMIT)
            }
            "fill-rule" => self.winding = Winding::from_attr(value).unwrap_or_default(),
            "opacity" => {
                self.opacity = parse_length(value)
                    .map(|o| o.clamp(0.0, 1.0))
                    .unwrap_or(defaults::OPACITY)
            }
            _ => return false,
        }
        true
    }

    /// Reset one presentation attribute to its default.
    pub fn reset_attribute(&mut self, key: &str) -> bool {
        self.apply_attribute(key, "")
    }

    pub const ATTRIBUTES: [&'static str; 8] = [
        "fill",
        "stroke",
        "stroke-width",
        "stroke-linecap",
        "stroke-linejoin",
        "stroke-miterlimit",
        "fill-rule",
        "opacity",
    ];
}

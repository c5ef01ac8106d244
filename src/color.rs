//! Continuous colour scale for severity values.
//!
//! A [`Palette`] is an ordered list of control points spanning `[0, 1]`.
//! [`ColorInterpolator::color_at`] finds the segment containing `t`, eases the
//! local parameter with smoothstep and interpolates each RGB channel.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::errors::PaletteError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// CSS functional notation, e.g. `rgb(172,38,196)`
impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub position: f64,
    pub color: Rgb,
}

impl ControlPoint {
    pub const fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

const DEFAULT_CONTROL_POINTS: [ControlPoint; 6] = [
    ControlPoint::new(0.0, Rgb::new(255, 237, 160)),
    ControlPoint::new(0.2, Rgb::new(254, 178, 76)),
    ControlPoint::new(0.4, Rgb::new(240, 59, 32)),
    ControlPoint::new(0.6, Rgb::new(172, 38, 196)),
    ControlPoint::new(0.8, Rgb::new(84, 39, 143)),
    ControlPoint::new(1.0, Rgb::new(35, 14, 70)),
];

/// Validated, immutable list of control points.
///
/// Positions are finite and strictly increasing, the first is `0.0` and the
/// last is `1.0`. The only way to obtain a `Palette` is through
/// [`Palette::new`] or [`Palette::default`], so every lookup in `[0, 1]`
/// finds a segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    points: Vec<ControlPoint>,
}

impl Palette {
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, PaletteError> {
        if points.len() < 2 {
            return Err(PaletteError::TooFewPoints(points.len()));
        }

        if let Some(index) = points.iter().position(|p| !p.position.is_finite()) {
            return Err(PaletteError::NonFinitePosition(index));
        }

        let first = points[0].position;
        if first != 0.0 {
            return Err(PaletteError::FirstNotZero(first));
        }

        let last = points[points.len() - 1].position;
        if last != 1.0 {
            return Err(PaletteError::LastNotOne(last));
        }

        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].position <= pair[0].position {
                return Err(PaletteError::NotIncreasing {
                    index: index + 1,
                    position: pair[1].position,
                    previous: pair[0].position,
                });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn first_color(&self) -> Rgb {
        self.points[0].color
    }

    pub fn last_color(&self) -> Rgb {
        self.points[self.points.len() - 1].color
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            points: DEFAULT_CONTROL_POINTS.to_vec(),
        }
    }
}

/// Smoothstep easing, zero slope at both ends.
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp_channel(from: u8, to: u8, amount: f64) -> u8 {
    let from = from as f64;
    let to = to as f64;
    (from + (to - from) * amount).round().clamp(0.0, 255.0) as u8
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorInterpolator {
    palette: Palette,
}

impl ColorInterpolator {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Colour for a severity value in `[0, 1]`.
    ///
    /// Values outside the range are clamped to the nearest endpoint and `NaN`
    /// is treated as `0.0`, so the result is always a palette colour or a
    /// blend between two neighbouring control points.
    pub fn color_at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let points = self.palette.points();

        let segment = points
            .windows(2)
            .find(|pair| t <= pair[1].position)
            .map(|pair| (pair[0], pair[1]));

        let (lower, upper) = match segment {
            Some(segment) => segment,
            None => return self.palette.last_color(),
        };

        let local_t = (t - lower.position) / (upper.position - lower.position);
        let eased = smoothstep(local_t);

        Rgb {
            r: lerp_channel(lower.color.r, upper.color.r, eased),
            g: lerp_channel(lower.color.g, upper.color.g, eased),
            b: lerp_channel(lower.color.b, upper.color.b, eased),
        }
    }

    /// Colour for a reduction percentage in `[0, 100]`
    pub fn color_for_reduction(&self, percent: f64) -> Rgb {
        self.color_at(percent / 100.0)
    }
}

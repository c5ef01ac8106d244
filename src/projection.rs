//! Spherical Mercator fitted to a viewport.
//!
//! Screen coordinates grow to the right and downwards, so north is up.

use geo::{coord, Coord, Rect};
use std::f64::consts::FRAC_PI_4;

/// Latitude beyond which Mercator diverges
pub const MAX_LATITUDE: f64 = 85.051_128_78;

fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = lon.to_radians();
    let y = -(FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
}

impl Projection {
    /// Fits `bounds` (longitude/latitude degrees) into a `width` x `height`
    /// viewport, leaving `padding` on every side and keeping the aspect ratio.
    pub fn fit_extent(bounds: Rect<f64>, width: f64, height: f64, padding: f64) -> Self {
        let (x0, y0) = mercator(bounds.min().x, bounds.max().y);
        let (x1, y1) = mercator(bounds.max().x, bounds.min().y);

        let available_width = (width - 2.0 * padding).max(1.0);
        let available_height = (height - 2.0 * padding).max(1.0);

        let scale = [(x1 - x0, available_width), (y1 - y0, available_height)]
            .iter()
            .filter(|(extent, _)| *extent > 0.0)
            .map(|(extent, available)| available / extent)
            .fold(f64::INFINITY, f64::min);
        // a single point has no extent to fit
        let scale = if scale.is_finite() { scale } else { 1.0 };

        Self {
            scale,
            translate_x: width / 2.0 - scale * (x0 + x1) / 2.0,
            translate_y: height / 2.0 - scale * (y0 + y1) / 2.0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Screen position of a longitude/latitude pair
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = mercator(lon, lat);
        (
            self.translate_x + self.scale * x,
            self.translate_y + self.scale * y,
        )
    }

    pub fn project_coord(&self, c: Coord<f64>) -> Coord<f64> {
        let (x, y) = self.project(c.x, c.y);
        coord! { x: x, y: y }
    }
}

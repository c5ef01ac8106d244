use geo::{BoundingRect, Geometry, GeometryCollection, LineString, Polygon, Rect};
use geojson::GeoJson;
use std::fmt::Write;
use std::path::Path;
use tracing::debug;

use crate::errors::ImportError;
use crate::projection::Projection;

/// Country outline drawn beneath the markers
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    geometry: GeometryCollection<f64>,
}

impl Boundary {
    pub fn from_geojson_str(source: &str, origin: &str) -> Result<Self, ImportError> {
        let geojson: GeoJson = source.parse()?;
        let geometry: GeometryCollection<f64> = geojson::quick_collection(&geojson)?;

        if geometry.0.is_empty() {
            return Err(ImportError::EmptyBoundary(origin.to_string()));
        }

        debug!("Boundary {} has {} geometries", origin, geometry.0.len());
        Ok(Self { geometry })
    }

    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&content, &path.display().to_string())
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.geometry.bounding_rect()
    }

    /// SVG path data for every areal and linear geometry, one entry each
    pub fn to_svg_paths(&self, projection: &Projection) -> Vec<String> {
        let mut paths = Vec::new();
        for geometry in self.geometry.iter() {
            collect_paths(geometry, projection, &mut paths);
        }
        paths
    }
}

fn collect_paths(geometry: &Geometry<f64>, projection: &Projection, paths: &mut Vec<String>) {
    match geometry {
        Geometry::Polygon(polygon) => paths.push(polygon_path(polygon, projection)),
        Geometry::MultiPolygon(multi) => {
            paths.extend(multi.iter().map(|p| polygon_path(p, projection)))
        }
        Geometry::Rect(rect) => paths.push(polygon_path(&rect.to_polygon(), projection)),
        Geometry::Triangle(triangle) => {
            paths.push(polygon_path(&triangle.to_polygon(), projection))
        }
        Geometry::LineString(line) => {
            let mut d = String::new();
            append_ring(&mut d, line, projection, false);
            paths.push(d);
        }
        Geometry::MultiLineString(multi) => {
            for line in multi.iter() {
                let mut d = String::new();
                append_ring(&mut d, line, projection, false);
                paths.push(d);
            }
        }
        Geometry::GeometryCollection(collection) => {
            for inner in collection.iter() {
                collect_paths(inner, projection, paths);
            }
        }
        // points carry no outline
        _ => {}
    }
}

/// Exterior and holes share one path so the even-odd fill cuts the holes out
fn polygon_path(polygon: &Polygon<f64>, projection: &Projection) -> String {
    let mut d = String::new();
    append_ring(&mut d, polygon.exterior(), projection, true);
    for interior in polygon.interiors() {
        append_ring(&mut d, interior, projection, true);
    }
    d
}

fn append_ring(d: &mut String, ring: &LineString<f64>, projection: &Projection, close: bool) {
    for (i, c) in ring.coords().enumerate() {
        let p = projection.project_coord(*c);
        let command = if i == 0 { 'M' } else { 'L' };
        // writing into a String cannot fail
        let _ = write!(d, "{}{:.2},{:.2}", command, p.x, p.y);
    }
    if close && ring.coords().next().is_some() {
        d.push('Z');
    }
}

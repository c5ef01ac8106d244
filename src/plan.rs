use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::color::{ColorInterpolator, ControlPoint, Palette};
use crate::errors::PaletteError;
use crate::render_context::{RenderSettings, ViewTransform};

/// ## Structure
/// This module contains the data structures for the plan file.
///
/// ```text
/// Plan
///   ├── meta: Option<Meta>
///   │   └── name: Option<String>
///   ├── import: ImportConfig
///   │   ├── airports: String
///   │   └── boundary: Option<String>
///   ├── render: Option<RenderProfile>
///   │   ├── container_width, aspect, padding: Option<f64>
///   │   ├── min_radius, max_radius, stroke_width: Option<f64>
///   │   ├── zoom: Option<ZoomProfile>
///   │   ├── palette: Option<Vec<ControlPoint>>
///   │   └── legend_title, prior_label, current_label: Option<String>
///   └── export: ExportProfile
///       └── profiles: Vec<ExportProfileItem>
///           ├── filename: String
///           └── exporter: ExportFileType
///               ├── SVG
///               ├── GeoJSON
///               ├── CSV
///               └── Custom(CustomExportProfile)
/// ```

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub meta: Option<Meta>,
    pub import: ImportConfig,
    #[serde(default)]
    pub render: Option<RenderProfile>,
    pub export: ExportProfile,
}

//
// Import configuration
//

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImportConfig {
    pub airports: String,
    pub boundary: Option<String>,
}

//
// Render configuration
//

#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub struct ZoomProfile {
    pub scale: f64,
    #[serde(default)]
    pub translate: [f64; 2],
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RenderProfile {
    pub container_width: Option<f64>,
    pub aspect: Option<f64>,
    pub padding: Option<f64>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
    pub stroke_width: Option<f64>,
    pub zoom: Option<ZoomProfile>,
    pub palette: Option<Vec<ControlPoint>>,
    pub legend_title: Option<String>,
    pub prior_label: Option<String>,
    pub current_label: Option<String>,
}

//
// Export configuration
//

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ExportProfile {
    pub profiles: Vec<ExportProfileItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportProfileItem {
    pub filename: String,
    pub exporter: ExportFileType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomExportProfile {
    pub template: String,
    pub partials: Option<HashMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ExportFileType {
    SVG,
    GeoJSON,
    CSV,
    Custom(CustomExportProfile),
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            meta: Some(Meta {
                name: Some("Airport traffic reduction".to_string()),
            }),
            import: ImportConfig {
                airports: "airports.csv".to_string(),
                boundary: Some("boundary.geojson".to_string()),
            },
            render: Some(RenderProfile::default()),
            export: ExportProfile {
                profiles: vec![ExportProfileItem {
                    filename: "out/map.svg".to_string(),
                    exporter: ExportFileType::SVG,
                }],
            },
        }
    }
}

impl Plan {
    pub fn name(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Render settings with defaults filled in for everything left out
    pub fn get_render_settings(&self) -> RenderSettings {
        let defaults = RenderSettings::default();
        let profile = self.render.clone().unwrap_or_default();

        RenderSettings {
            title: self.name().map(str::to_string).unwrap_or(defaults.title),
            container_width: profile.container_width.unwrap_or(defaults.container_width),
            aspect: profile.aspect.unwrap_or(defaults.aspect),
            padding: profile.padding.unwrap_or(defaults.padding),
            min_radius: profile.min_radius.unwrap_or(defaults.min_radius),
            max_radius: profile.max_radius.unwrap_or(defaults.max_radius),
            stroke_width: profile.stroke_width.unwrap_or(defaults.stroke_width),
            view: profile
                .zoom
                .map(|z| ViewTransform::new(z.scale, z.translate[0], z.translate[1]))
                .unwrap_or(defaults.view),
            legend_title: profile.legend_title.unwrap_or(defaults.legend_title),
        }
    }

    /// Interpolator over the plan's palette, or the default one
    pub fn get_interpolator(&self) -> Result<ColorInterpolator, PaletteError> {
        let palette = match self.render.as_ref().and_then(|r| r.palette.clone()) {
            Some(points) => Palette::new(points)?,
            None => Palette::default(),
        };
        Ok(ColorInterpolator::new(palette))
    }

    pub fn get_tooltip_labels(&self) -> (Option<String>, Option<String>) {
        match &self.render {
            Some(render) => (render.prior_label.clone(), render.current_label.clone()),
            None => (None, None),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::airport::AirportRecord;

/// Text shown when a marker is hovered
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DisplayText {
    pub title: String,
    pub lines: Vec<String>,
}

impl DisplayText {
    /// Title and lines joined with newlines, as used by SVG `<title>`
    pub fn to_plain_text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub trait HoverText {
    fn on_hover(&self, record: &AirportRecord) -> DisplayText;
}

#[derive(Clone, Debug, PartialEq)]
pub struct DefaultTooltip {
    pub prior_label: String,
    pub current_label: String,
}

impl Default for DefaultTooltip {
    fn default() -> Self {
        Self {
            prior_label: "2019".to_string(),
            current_label: "2020".to_string(),
        }
    }
}

/// Whole values print without a fraction, everything else with one digit
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

impl HoverText for DefaultTooltip {
    fn on_hover(&self, record: &AirportRecord) -> DisplayText {
        DisplayText {
            title: record.identifier.clone(),
            lines: vec![
                format!("{}: {}", self.prior_label, format_value(record.prior_value)),
                format!("{}: {}", self.current_label, format_value(record.current_value)),
                format!("Reduction: {:.1}%", record.reduction_percent),
            ],
        }
    }
}

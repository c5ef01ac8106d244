use crate::airport::AirportRecord;
use crate::render_context::RenderContext;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use std::error::Error;

/// Airports as point features carrying their statistics and marker colour
pub fn render(context: &RenderContext, records: &[AirportRecord]) -> Result<String, Box<dyn Error>> {
    let features = records
        .iter()
        .map(|record| {
            let color = context.interpolator.color_at(record.severity());
            let mut properties = JsonObject::new();
            properties.insert("identifier".to_string(), json!(record.identifier));
            properties.insert("prior_value".to_string(), json!(record.prior_value));
            properties.insert("current_value".to_string(), json!(record.current_value));
            properties.insert(
                "reduction_percent".to_string(),
                json!(record.reduction_percent),
            );
            properties.insert("color".to_string(), json!(color.to_string()));
            properties.insert("tooltip".to_string(), json!(context.on_hover(record)));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    record.longitude,
                    record.latitude,
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    Ok(serde_json::to_string_pretty(&collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorInterpolator;
    use crate::render_context::RenderSettings;
    use geojson::GeoJson;

    #[test]
    fn records_become_point_features() {
        let records = vec![AirportRecord {
            identifier: "SCL".to_string(),
            latitude: -33.669,
            longitude: -70.645,
            prior_value: 100.0,
            current_value: 40.0,
            reduction_percent: 60.0,
        }];
        let context = RenderContext::build(
            &RenderSettings::default(),
            ColorInterpolator::default(),
            None,
            &records,
        )
        .expect("context");

        let output = render(&context, &records).expect("render");
        let parsed: GeoJson = output.parse().expect("valid geojson");
        let collection = match parsed {
            GeoJson::FeatureCollection(collection) => collection,
            other => panic!("unexpected geojson {:?}", other),
        };

        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(
            feature.geometry.as_ref().map(|g| g.value.clone()),
            Some(Value::Point(vec![-70.645, -33.669]))
        );
        assert_eq!(
            feature.property("color").and_then(|c| c.as_str()),
            Some("rgb(172,38,196)")
        );
        assert_eq!(
            feature.property("tooltip").and_then(|t| t["title"].as_str()),
            Some("SCL")
        );
    }
}

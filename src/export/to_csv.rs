use crate::airport::AirportRecord;
use crate::render_context::RenderContext;
use csv::Writer;
use std::error::Error;

/// Normalised records with the colour each marker is drawn in
pub fn render(context: &RenderContext, records: &[AirportRecord]) -> Result<String, Box<dyn Error>> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record([
        "identifier",
        "latitude",
        "longitude",
        "prior_value",
        "current_value",
        "reduction_percent",
        "color",
    ])?;

    for record in records {
        wtr.write_record(&[
            record.identifier.clone(),
            record.latitude.to_string(),
            record.longitude.to_string(),
            record.prior_value.to_string(),
            record.current_value.to_string(),
            format!("{:.1}", record.reduction_percent),
            context.interpolator.color_at(record.severity()).to_hex(),
        ])?;
    }

    let data = wtr.into_inner()?;
    let csv_string = String::from_utf8(data)?;

    Ok(csv_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorInterpolator;
    use crate::render_context::RenderSettings;

    #[test]
    fn one_line_per_record_after_header() {
        let records = vec![
            AirportRecord {
                identifier: "SCL".to_string(),
                latitude: -33.669,
                longitude: -70.645,
                prior_value: 100.0,
                current_value: 40.0,
                reduction_percent: 60.0,
            },
            AirportRecord {
                identifier: "Cerro, Moreno".to_string(),
                latitude: -23.444,
                longitude: -70.445,
                prior_value: 80.0,
                current_value: 80.0,
                reduction_percent: 0.0,
            },
        ];
        let context = RenderContext::build(
            &RenderSettings::default(),
            ColorInterpolator::default(),
            None,
            &records,
        )
        .expect("context");

        let output = render(&context, &records).expect("render");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "identifier,latitude,longitude,prior_value,current_value,reduction_percent,color",
                "SCL,-33.669,-70.645,100,40,60.0,#ac26c4",
                "\"Cerro, Moreno\",-23.444,-70.445,80,80,0.0,#ffeda0",
            ]
        );
    }
}

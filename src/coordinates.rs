//! Repair of fixed-format coordinate strings.
//!
//! The source dataset stores coordinates as digit runs with missing or
//! misplaced separators, e.g. `-336695` or `-33.669.5` for `-33.669`. The
//! repair strips every separator and re-inserts one after the third
//! character, keeping three fraction digits. This only reconstructs values
//! whose integer part (sign included) is exactly three characters wide.

const SEPARATORS: [char; 2] = ['.', ','];
const INTEGER_WIDTH: usize = 3;
const FRACTION_WIDTH: usize = 3;

/// Repairs a raw coordinate string into a float.
///
/// Returns `NaN` when the repaired string does not parse. Inputs shorter than
/// six characters after stripping are truncated rather than rejected, so
/// `"-33"` becomes `-33.0`.
pub fn normalize(raw: &str) -> f64 {
    let digits: Vec<char> = raw
        .trim()
        .chars()
        .filter(|c| !SEPARATORS.contains(c))
        .collect();

    let split = INTEGER_WIDTH.min(digits.len());
    let integer: String = digits[..split].iter().collect();
    let fraction: String = digits[split..].iter().take(FRACTION_WIDTH).collect();

    format!("{}.{}", integer, fraction)
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

/// Repairs a latitude/longitude pair.
///
/// `None` if either side is `NaN` or outside the geographic range.
pub fn normalize_pair(raw_lat: &str, raw_lon: &str) -> Option<(f64, f64)> {
    let lat = normalize(raw_lat);
    let lon = normalize(raw_lon);

    if is_valid_latitude(lat) && is_valid_longitude(lon) {
        Some((lat, lon))
    } else {
        None
    }
}

pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_separator_after_sign_and_two_digits() {
        assert_eq!(normalize("-336695"), -33.669);
        assert_eq!(normalize("-706453"), -70.645);
    }

    #[test]
    fn strips_misplaced_separators_first() {
        assert_eq!(normalize("-33.6695"), -33.669);
        assert_eq!(normalize("-3.366.95"), -33.669);
        assert_eq!(normalize("-70,6453"), -70.645);
        assert_eq!(normalize("  -18.3485 "), -18.348);
    }

    #[test]
    fn unsigned_input_keeps_three_integer_digits() {
        assert_eq!(normalize("336695"), 336.695);
    }

    #[test]
    fn short_input_is_truncated_not_rejected() {
        assert_eq!(normalize("-33"), -33.0);
        assert_eq!(normalize("-3366"), -33.66);
    }

    #[test]
    fn non_numeric_input_is_nan() {
        assert!(normalize("").is_nan());
        assert!(normalize("abc123").is_nan());
        assert!(normalize("-33x695").is_nan());
        assert!(normalize("N/A").is_nan());
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert!(normalize("−336695").is_nan());
        assert!(normalize("°°°°").is_nan());
    }

    #[test]
    fn pair_rejects_nan_and_out_of_range() {
        assert_eq!(
            normalize_pair("-336695", "-706453"),
            Some((-33.669, -70.645))
        );
        assert_eq!(normalize_pair("bad", "-706453"), None);
        assert_eq!(normalize_pair("-336695", "999999"), None);
        assert_eq!(normalize_pair("336695", "-706453"), None);
    }
}

//! Small geographic helpers used when presenting cities.

/// Mean Earth radius (IUGG), in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points given in decimal degrees.
#[must_use]
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Flag emoji for an ISO 3166-1 alpha-2 code, e.g. `"jp"` → 🇯🇵.
///
/// Returns `None` unless the code is exactly two ASCII letters.
#[must_use]
pub fn flag_emoji(country_code: &str) -> Option<String> {
    let code = country_code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c.to_ascii_uppercase() as u32 - 'A' as u32)))
        .collect()
}

/// Checks a latitude/longitude pair is within range.
#[must_use]
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km((48.8566, 2.3522), (48.8566, 2.3522)), 0.0);
    }

    #[test]
    fn paris_to_london() {
        let d = distance_km((48.8566, 2.3522), (51.5074, -0.1278));
        assert!((d - 343.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let d = distance_km((0.0, 0.0), (0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn flags_from_codes() {
        assert_eq!(flag_emoji("JP").as_deref(), Some("🇯🇵"));
        assert_eq!(flag_emoji("it").as_deref(), Some("🇮🇹"));
        assert_eq!(flag_emoji("ITA"), None);
        assert_eq!(flag_emoji("1T"), None);
        assert_eq!(flag_emoji(""), None);
    }

    #[test]
    fn coordinate_ranges() {
        assert!(valid_coordinates(90.0, -180.0));
        assert!(!valid_coordinates(90.1, 0.0));
        assert!(!valid_coordinates(0.0, 180.5));
    }
}

//! Great-circle bearing from a point to the Kaaba.

/// Kaaba coordinates in Mecca.
const KAABA_LAT: f64 = 21.4225;
const KAABA_LNG: f64 = 39.8262;

/// Compute the Qibla bearing in degrees from true north, in `[0, 360)`.
///
/// Total over all finite inputs. At the Kaaba itself both atan2 operands
/// vanish and the result is 0.0 (Rust's `atan2(0, 0)` convention); the
/// poles yield ordinary finite bearings.
pub fn bearing(latitude: f64, longitude: f64) -> f64 {
    let lat = latitude.to_radians();
    let kaaba_lat = KAABA_LAT.to_radians();
    let dlng = (KAABA_LNG - longitude).to_radians();

    let y = dlng.sin();
    let x = lat.cos() * kaaba_lat.tan() - lat.sin() * dlng.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_from_cairo_matches_reference() {
        // Known Qibla from Cairo is roughly 136 degrees.
        let b = bearing(30.0444, 31.2357);
        assert!((b - 136.14).abs() < 0.5, "got {b}");
    }

    #[test]
    fn bearing_is_normalized_for_sample_points() {
        let samples = [
            (30.0444, 31.2357),
            (31.2001, 29.9187),
            (-33.8688, 151.2093),
            (40.7128, -74.0060),
            (0.0, 0.0),
            (90.0, 0.0),
            (-90.0, 0.0),
        ];
        for (lat, lng) in samples {
            let b = bearing(lat, lng);
            assert!(b.is_finite());
            assert!((0.0..360.0).contains(&b), "bearing {b} for ({lat},{lng})");
        }
    }

    #[test]
    fn bearing_at_kaaba_is_zero() {
        assert_eq!(bearing(21.4225, 39.8262), 0.0);
    }

    #[test]
    fn bearing_is_continuous_near_cairo() {
        let base = bearing(30.0444, 31.2357);
        let nudged = bearing(30.05, 31.24);
        assert!((base - nudged).abs() < 1.0);
    }
}

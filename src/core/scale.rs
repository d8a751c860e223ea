use crate::error::{LensError, LensResult};

/// Affine map from a value domain onto a pixel range.
///
/// The pixel range may run backwards (`pixel_start > pixel_end`), which is
/// how the value axis is inverted: larger values land on smaller Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> LensResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(LensError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(LensError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        // Halved operands cannot overflow on subtraction.
        let normalized = (value * 0.5 - self.domain_start * 0.5)
            / (self.domain_end * 0.5 - self.domain_start * 0.5);
        self.pixel_start + normalized * (self.pixel_end - self.pixel_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use approx::assert_relative_eq;

    #[test]
    fn inverted_range_maps_larger_values_upwards() {
        let scale = LinearScale::new(0.0, 100.0, 270.0, 50.0).expect("valid scale");
        assert_relative_eq!(scale.domain_to_pixel(0.0), 270.0);
        assert_relative_eq!(scale.domain_to_pixel(100.0), 50.0);
        assert_relative_eq!(scale.domain_to_pixel(50.0), 160.0);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let scale = LinearScale::new(10.0, 110.0, 50.0, 550.0).expect("valid scale");
        let px = scale.domain_to_pixel(42.5);
        assert_relative_eq!(scale.pixel_to_domain(px), 42.5, epsilon = 1e-9);
    }

    #[test]
    fn full_f64_domain_maps_without_overflow() {
        let scale = LinearScale::new(f64::MIN, f64::MAX, 270.0, 50.0).expect("valid scale");
        assert_relative_eq!(scale.domain_to_pixel(f64::MIN), 270.0);
        assert_relative_eq!(scale.domain_to_pixel(0.0), 160.0);
        assert_relative_eq!(scale.domain_to_pixel(f64::MAX), 50.0);
    }

    #[test]
    fn zero_span_domain_is_rejected() {
        assert!(LinearScale::new(5.0, 5.0, 0.0, 100.0).is_err());
        assert!(LinearScale::new(f64::NAN, 5.0, 0.0, 100.0).is_err());
    }
}

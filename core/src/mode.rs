use nalgebra::DVector;

/// A flat 3N-dimensional configuration: x0, y0, z0, x1, y1, z1, ...
pub type Coordinates = DVector<f64>;

/// A single vibrational mode of a configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalMode {
    pub frequency: f64,
    pub eigenvector: Coordinates,
}

impl NormalMode {
    pub fn new(frequency: f64, eigenvector: Coordinates) -> Self {
        Self {
            frequency,
            eigenvector,
        }
    }

    /// The one-line list label, e.g. `1.23457e+02`.
    pub fn label(&self) -> String {
        format_frequency(self.frequency)
    }
}

/// Formats a frequency in scientific notation with 5 digits after the decimal
/// point and a signed, at least two digit exponent.
pub fn format_frequency(frequency: f64) -> String {
    if frequency.is_nan() {
        return "nan".to_owned();
    }
    if frequency.is_infinite() {
        return if frequency > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    // rust prints `1.23456e2`, the list shows `1.23456e+02`
    let formatted = format!("{frequency:.5e}");
    let (mantissa, exponent) = formatted
        .split_once('e')
        .unwrap_or((formatted.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };

    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_exponent() {
        assert_eq!(format_frequency(123.456), "1.23456e+02");
        assert_eq!(format_frequency(123.4567), "1.23457e+02");
    }

    #[test]
    fn negative_and_small_values() {
        assert_eq!(format_frequency(-0.00123456), "-1.23456e-03");
        assert_eq!(format_frequency(1.0), "1.00000e+00");
        assert_eq!(format_frequency(0.0), "0.00000e+00");
        assert_eq!(format_frequency(2.5e-120), "2.50000e-120");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_frequency(f64::NAN), "nan");
        assert_eq!(format_frequency(f64::INFINITY), "inf");
        assert_eq!(format_frequency(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn mode_label() {
        let mode = NormalMode::new(42.0, DVector::zeros(3));
        assert_eq!(mode.label(), "4.20000e+01");
    }
}

/// Formats a number in compact scientific notation for slider value labels.
///
/// The coefficient is taken from the shortest exact representation and then
/// rounded to `decimals` fractional digits, so values just below a power of ten
/// keep their exponent: `9.999` with two decimals becomes `10.00e+0`.
///
/// # Examples
/// ```rust
/// use playground_controls::format::format_scientific;
/// assert_eq!(format_scientific(1234.5, 2), "1.23e+3");
/// assert_eq!(format_scientific(0.00012, 2), "1.20e-4");
/// ```
pub fn format_scientific(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // Negative zero prints without a sign
    let value = if value == 0.0 { 0.0 } else { value };

    let raw = format!("{value:e}");
    let (coefficient, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let coefficient: f64 = coefficient.parse().unwrap_or(value);
    let exponent: i32 = exponent.parse().unwrap_or(0);

    format!("{coefficient:.decimals$}e{exponent:+}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_and_small() {
        assert_eq!(format_scientific(1234.5, 2), "1.23e+3");
        assert_eq!(format_scientific(0.00012, 2), "1.20e-4");
        assert_eq!(format_scientific(-56000.0, 1), "-5.6e+4");
    }

    #[test]
    fn test_zero_and_unit() {
        assert_eq!(format_scientific(0.0, 2), "0.00e+0");
        assert_eq!(format_scientific(1.0, 0), "1e+0");
    }

    #[test]
    fn test_negative_zero_is_unsigned() {
        assert_eq!(format_scientific(-0.0, 2), "0.00e+0");
        assert_eq!(format_scientific(-1.0e-300 * 1.0e-300, 2), "0.00e+0");
    }

    #[test]
    fn test_rounding_carries_into_coefficient() {
        assert_eq!(format_scientific(9.999, 2), "10.00e+0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_scientific(f64::NAN, 2), "NaN");
        assert_eq!(format_scientific(f64::INFINITY, 2), "Infinity");
        assert_eq!(format_scientific(f64::NEG_INFINITY, 2), "-Infinity");
    }
}

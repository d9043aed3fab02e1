/// Significant digits shown for numbers.
const PRECISION: usize = 6;

/// Format a number for display.
///
/// Uses the shortest of fixed and scientific notation with six significant
/// digits and no trailing zeros, so `1.0` prints as `1`, `1.0/3.0` as
/// `0.333333` and `1e6` as `1e+06`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Round first; the exponent after rounding picks the notation.
    let sci = format!("{:.*e}", PRECISION - 1, n);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(123456.0), "123456");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(2.25), "2.25");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_number(1e6), "1e+06");
        assert_eq!(format_number(1234567.0), "1.23457e+06");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(-1.5e-7), "-1.5e-07");
        assert_eq!(format_number(1e100), "1e+100");
    }

    #[test]
    fn test_rounding_carries_into_exponent() {
        assert_eq!(format_number(999999.7), "1e+06");
        assert_eq!(format_number(99999.96), "100000");
    }
}

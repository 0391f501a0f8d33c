use num_bigint::BigUint;
use num_traits::FromPrimitive;

use crate::value::Numeric;

/// A value split into the pieces the rendering pipeline consumes.
/// Built fresh per format call and discarded afterwards.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NumberParts {
    /// -1, 0 or 1 from comparison with zero (negative zero counts as 0).
    pub sign: i8,
    /// Integer digits without a sign, at least "0".
    pub int_digits: String,
    /// Exact integer magnitude; not bounded by any machine word.
    pub int_magnitude: BigUint,
    /// Fraction digits past the `scale` leading zeros; empty iff the
    /// value is integral.
    pub frac_digits: String,
    /// Approximate fraction value in [0, 1) described by `frac_digits`.
    pub frac_value: f64,
    /// Count of leading zero digits right after the decimal point,
    /// nonzero only for magnitudes below 0.1.
    pub scale: usize,
}

pub(crate) fn split_number(value: Numeric) -> NumberParts {
    match value {
        Numeric::Float(v) => split_float(v),
        Numeric::Int(v) => split_int(v),
    }
}

fn split_int(value: i128) -> NumberParts {
    let sign = if value > 0 {
        1
    } else if value < 0 {
        -1
    } else {
        0
    };
    let magnitude = value.unsigned_abs();
    NumberParts {
        sign,
        int_digits: magnitude.to_string(),
        int_magnitude: BigUint::from(magnitude),
        frac_digits: String::new(),
        frac_value: 0.0,
        scale: 0,
    }
}

fn split_float(value: f64) -> NumberParts {
    debug_assert!(value.is_finite());
    if value == 0.0 {
        return NumberParts {
            sign: 0,
            int_digits: "0".to_string(),
            int_magnitude: BigUint::from(0u32),
            frac_digits: String::new(),
            frac_value: 0.0,
            scale: 0,
        };
    }
    let sign = if value > 0.0 { 1 } else { -1 };
    let abs = value.abs();

    // The shortest-string digits of an integral double past 2^53 can be
    // rounded (1e23 prints as "1e+23" but truncates to
    // 99999999999999991611392), so the integer part converts from the
    // binary value directly.
    let int_magnitude =
        BigUint::from_f64(abs.trunc()).expect("truncated finite value converts to an integer");

    let (frac_digits, scale) = split_fraction(abs);
    let frac_value = if frac_digits.is_empty() {
        0.0
    } else {
        format!("0.{frac_digits}").parse().unwrap_or(0.0)
    };

    NumberParts {
        sign,
        int_digits: int_magnitude.to_string(),
        int_magnitude,
        frac_digits,
        frac_value,
        scale,
    }
}

/// Fraction digits of `abs` via its shortest round-trip decimal form,
/// with the leading zeros of sub-0.1 magnitudes split off as `scale`.
/// The split is a plain digit shift, so rescaling by 10^scale is exact.
fn split_fraction(abs: f64) -> (String, usize) {
    if abs.fract() == 0.0 {
        return (String::new(), 0);
    }
    let mut buffer = ryu_js::Buffer::new();
    let repr = buffer.format(abs);

    let full = if let Some((mantissa, exponent)) = repr.split_once('e') {
        // Small magnitudes print as d.ddde-N; rebuild the zeros the
        // notation elides. A positive exponent implies an integral
        // value and cannot reach this branch.
        let exponent: i32 = exponent.parse().unwrap_or(0);
        debug_assert!(exponent < 0);
        let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
        let mut rebuilt = "0".repeat(exponent.unsigned_abs().saturating_sub(1) as usize);
        rebuilt.push_str(&digits);
        rebuilt
    } else {
        match repr.split_once('.') {
            Some((_, frac)) => frac.to_string(),
            None => String::new(),
        }
    };

    if abs < 0.1 {
        let scale = full.bytes().take_while(|&b| b == b'0').count();
        (full[scale..].to_string(), scale)
    } else {
        (full, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_parts(value: f64) -> NumberParts {
        split_number(Numeric::Float(value))
    }

    #[test]
    fn plain_value_splits_on_the_point() {
        let parts = float_parts(12.734626);
        assert_eq!(parts.sign, 1);
        assert_eq!(parts.int_digits, "12");
        assert_eq!(parts.frac_digits, "734626");
        assert_eq!(parts.scale, 0);
        assert!((parts.frac_value - 0.734626).abs() < 1e-12);
    }

    #[test]
    fn negative_sign_is_recorded_without_digits() {
        let parts = float_parts(-75.9);
        assert_eq!(parts.sign, -1);
        assert_eq!(parts.int_digits, "75");
        assert_eq!(parts.frac_digits, "9");
    }

    #[test]
    fn zero_has_no_sign_and_no_fraction() {
        for zero in [0.0, -0.0] {
            let parts = float_parts(zero);
            assert_eq!(parts.sign, 0);
            assert_eq!(parts.int_digits, "0");
            assert_eq!(parts.frac_digits, "");
            assert_eq!(parts.scale, 0);
        }
    }

    #[test]
    fn sub_tenth_values_split_off_leading_zeros() {
        let parts = float_parts(0.0123456);
        assert_eq!(parts.int_digits, "0");
        assert_eq!(parts.scale, 1);
        assert_eq!(parts.frac_digits, "123456");

        let parts = float_parts(0.000_000_067_89);
        assert_eq!(parts.scale, 7);
        assert_eq!(parts.frac_digits, "6789");
    }

    #[test]
    fn exponential_reprs_rebuild_their_zeros() {
        let parts = float_parts(2.1e-16);
        assert_eq!(parts.scale, 15);
        assert_eq!(parts.frac_digits, "21");

        let parts = float_parts(1.23e-8);
        assert_eq!(parts.scale, 7);
        assert_eq!(parts.frac_digits, "123");
    }

    #[test]
    fn integral_floats_have_empty_fractions() {
        let parts = float_parts(12345e3);
        assert_eq!(parts.int_digits, "12345000");
        assert_eq!(parts.frac_digits, "");
        assert_eq!(parts.frac_value, 0.0);
    }

    #[test]
    fn integer_part_is_binary_exact_past_the_double_mantissa() {
        let parts = float_parts(1e23);
        assert_eq!(parts.int_digits, "99999999999999991611392");

        let parts = float_parts(1e18);
        assert_eq!(parts.int_digits, "1000000000000000000");
    }

    #[test]
    fn int_inputs_keep_every_digit() {
        let parts = split_number(Numeric::Int(123_456_789_234_567_890_123));
        assert_eq!(parts.int_digits, "123456789234567890123");
        assert_eq!(parts.frac_digits, "");
        assert_eq!(parts.sign, 1);

        let parts = split_number(Numeric::Int(-5));
        assert_eq!(parts.sign, -1);
        assert_eq!(parts.int_digits, "5");
    }
}

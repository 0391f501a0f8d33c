//! Half-up rounding of decimal digit strings with carry propagation.

/// Digits of fidelity a double can actually back; anything past this
/// in a fraction is padding, never data.
pub(crate) const MAX_FIDELITY_DIGITS: usize = 15;

/// How the fraction digits are budgeted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FractionMode {
    /// Keep the digits as they are, minus trailing zeros.
    Natural,
    /// Exactly this many digits after the decimal point.
    Precision(usize),
    /// This many digits past the leading zeros.
    Significant(usize),
}

/// Round the fraction `digits` (the part past `scale` leading zeros) to
/// the requested budget. Returns the finished digit string, without its
/// decimal point, and whether rounding crossed the unit boundary so the
/// integer part must be incremented.
pub(crate) fn round_fraction(
    digits: &str,
    scale: usize,
    mode: FractionMode,
) -> (String, bool) {
    let mut full = "0".repeat(scale);
    full.push_str(digits);

    // Cap at double fidelity first, so oversized budgets pad with
    // zeros instead of inventing digits.
    let cap = scale + MAX_FIDELITY_DIGITS;
    let mut crossed_unit = false;
    if full.len() > cap {
        let (capped, crossed) = round_to_budget(&full, cap);
        full = capped;
        crossed_unit = crossed;
    }

    let (rounded, crossed) = match mode {
        FractionMode::Natural => (full.trim_end_matches('0').to_string(), false),
        FractionMode::Precision(budget) => round_to_budget(&full, budget),
        FractionMode::Significant(figures) => round_to_budget(&full, figures + scale),
    };
    debug_assert!(rounded.bytes().all(|b| b.is_ascii_digit()));
    (rounded, crossed_unit || crossed)
}

/// Round `digits` half-up to exactly `budget` digits, padding with
/// zeros when the budget exceeds what is available. The flag reports a
/// carry that ran off the front of the string: the leading 1 belongs to
/// the integer part, and the remaining zeros (truncated to the budget)
/// stay in the fraction.
pub(crate) fn round_to_budget(digits: &str, budget: usize) -> (String, bool) {
    use std::cmp::Ordering;

    match digits.len().cmp(&budget) {
        Ordering::Equal => (digits.to_string(), false),
        Ordering::Less => {
            let mut padded = digits.to_string();
            padded.push_str(&"0".repeat(budget - digits.len()));
            (padded, false)
        }
        Ordering::Greater => {
            let kept = &digits[..budget];
            if digits.as_bytes()[budget] >= b'5' {
                let incremented = increment_digits(kept);
                if incremented.len() > budget {
                    (incremented[1..].to_string(), true)
                } else {
                    (incremented, false)
                }
            } else {
                (kept.to_string(), false)
            }
        }
    }
}

/// Add one to a digit string, right to left; a carry that survives the
/// leftmost digit grows the string ("99999" becomes "100000", and the
/// empty string becomes "1").
pub(crate) fn increment_digits(digits: &str) -> String {
    let mut buf: Vec<u8> = digits.bytes().collect();
    let mut overflow = true;
    for slot in buf.iter_mut().rev() {
        if *slot == b'9' {
            *slot = b'0';
        } else {
            *slot += 1;
            overflow = false;
            break;
        }
    }
    if overflow {
        buf.insert(0, b'1');
    }
    buf.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_carries_right_to_left() {
        let cases = [
            ("", "1"),
            ("1", "2"),
            ("9", "10"),
            ("00012", "00013"),
            ("00013", "00014"),
            ("00019", "00020"),
            ("00149", "00150"),
            ("00199", "00200"),
            ("89999", "90000"),
            ("99999", "100000"),
        ];
        for (input, expected) in cases {
            assert_eq!(increment_digits(input), expected, "increment {input:?}");
        }
    }

    #[test]
    fn budget_rounding_is_half_up() {
        assert_eq!(round_to_budget("00013245", 5), ("00013".to_string(), false));
        assert_eq!(round_to_budget("00013745", 5), ("00014".to_string(), false));
        assert_eq!(round_to_budget("00019745", 5), ("00020".to_string(), false));
    }

    #[test]
    fn short_inputs_pad_with_zeros() {
        assert_eq!(
            round_to_budget("00019745", 10),
            ("0001974500".to_string(), false)
        );
        assert_eq!(round_to_budget("", 3), ("000".to_string(), false));
    }

    #[test]
    fn zero_budget_reports_unit_crossing() {
        assert_eq!(round_to_budget("9050123", 0), ("".to_string(), true));
        assert_eq!(round_to_budget("2", 0), ("".to_string(), false));
    }

    #[test]
    fn full_carry_hands_its_lead_digit_to_the_integer() {
        assert_eq!(round_to_budget("96", 1), ("0".to_string(), true));
        assert_eq!(
            round_to_budget("9999999999999999", 15),
            ("000000000000000".to_string(), true)
        );
    }

    #[test]
    fn natural_mode_caps_at_double_fidelity() {
        let (digits, crossed) = round_fraction("1234567890123457", 0, FractionMode::Natural);
        assert_eq!(digits, "123456789012346");
        assert!(!crossed);
    }

    #[test]
    fn natural_mode_strips_trailing_zeros() {
        let (digits, crossed) = round_fraction("123000", 0, FractionMode::Natural);
        assert_eq!(digits, "123");
        assert!(!crossed);
    }

    #[test]
    fn scale_zeros_count_toward_the_precision_budget() {
        // 0.016789 at four decimal places.
        let (digits, crossed) = round_fraction("16789", 1, FractionMode::Precision(4));
        assert_eq!(digits, "0168");
        assert!(!crossed);
    }

    #[test]
    fn carry_crosses_the_scale_zeros() {
        // 0.096 at one decimal place rounds up to 0.1.
        let (digits, crossed) = round_fraction("96", 1, FractionMode::Precision(1));
        assert_eq!(digits, "1");
        assert!(!crossed);
    }

    #[test]
    fn significant_budget_skips_leading_zeros() {
        let (digits, crossed) = round_fraction("123456", 5, FractionMode::Significant(1));
        assert_eq!(digits, "000001");
        assert!(!crossed);

        let (digits, _) = round_fraction("123456", 5, FractionMode::Significant(3));
        assert_eq!(digits, "00000123");
    }

    #[test]
    fn oversized_budgets_pad_rather_than_invent() {
        let (digits, _) = round_fraction("1234567890123457", 0, FractionMode::Precision(18));
        assert_eq!(digits, "123456789012346000");
    }
}

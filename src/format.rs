use std::fmt;

use num_bigint::BigUint;

use crate::decompose::{NumberParts, split_number};
use crate::options::{FormatOptions, OptionsError};
use crate::rounding::{
    FractionMode, MAX_FIDELITY_DIGITS, increment_digits, round_fraction,
};
use crate::value::Numeric;

/// Metric tier suffixes; tiers past "T" reuse it with an oversized
/// mantissa instead of inventing a unit.
const TIER_SUFFIXES: [&str; 5] = ["", "k", "M", "B", "T"];

/// Internal delegation is bounded: whole-value significant-figure
/// rounding restarts once, and an exponential mantissa renders once
/// through the plain pipeline. Deeper nesting is a defect.
const MAX_RENDER_DEPTH: u8 = 3;

/// The rendering entry point: validated options plus `format`.
///
/// ```
/// use readnum::{FormatOptions, NumberFormatter};
///
/// let formatter = NumberFormatter::new(FormatOptions {
///     use_shortform: true,
///     precision: Some(1),
///     ..FormatOptions::default()
/// })
/// .unwrap();
/// assert_eq!(formatter.format(1234), "1.2k");
/// ```
#[derive(Clone, Debug)]
pub struct NumberFormatter {
    opts: FormatOptions,
}

impl NumberFormatter {
    /// Validates the options; there is no partially constructed state.
    pub fn new(opts: FormatOptions) -> Result<Self, OptionsError> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn options(&self) -> &FormatOptions {
        &self.opts
    }

    /// Render one value. Pure: the same options and value always give
    /// the same string, and nothing is mutated.
    pub fn format<V: Into<Numeric>>(&self, value: V) -> String {
        render(&self.opts, value.into(), 0)
    }

    /// Bind a value for display-on-demand, so one formatter can hand
    /// out many `Display` handles.
    pub fn readable<V: Into<Numeric>>(&self, value: V) -> Readable<'_> {
        Readable {
            formatter: self,
            value: value.into(),
        }
    }
}

/// A value paired with its formatter, rendered lazily via `Display`.
#[derive(Clone, Copy, Debug)]
pub struct Readable<'a> {
    formatter: &'a NumberFormatter,
    value: Numeric,
}

impl fmt::Display for Readable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatter.format(self.value))
    }
}

fn render(opts: &FormatOptions, value: Numeric, depth: u8) -> String {
    assert!(depth <= MAX_RENDER_DEPTH, "render recursion exceeded its bound");

    let float = value.as_f64();
    if !float.is_finite() {
        return if float.is_nan() {
            "nan".to_string()
        } else if float > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    if let Some(figures) = opts.significant_figures
        && !opts.sig_figs_only_below_one
        && float.abs() >= 1.0
    {
        // Whole-value significant figures: round numerically, then
        // rerun with the option cleared in a derived copy so the pass
        // cannot repeat and the caller's options stay untouched.
        let mut derived = opts.clone();
        derived.significant_figures = None;
        let rounded = round_significant(float, figures);
        return render(&derived, Numeric::Float(rounded), depth + 1);
    }

    if opts.use_exponent_for_small && float != 0.0 && float.abs() <= opts.small_threshold {
        return render_exponential(opts, float, depth);
    }
    if opts.use_exponent_for_large && float.abs() >= opts.large_threshold {
        return render_exponential(opts, float, depth);
    }

    let parts = split_number(value);

    if opts.use_shortform && parts.int_magnitude > BigUint::from(1000u32) {
        return render_shortform(opts, &parts, float);
    }

    if parts.frac_value == 0.0 {
        let grouped = group_integer(&parts.int_digits, false, parts.sign, opts);
        if opts.show_decimal_if_integer {
            let zeros = opts.precision.unwrap_or(2);
            return format!("{grouped}{}{}", opts.decimal_symbol, "0".repeat(zeros));
        }
        return grouped;
    }

    let (frac, crossed_unit) = round_fraction(&parts.frac_digits, parts.scale, fraction_mode(opts));
    let grouped = group_integer(&parts.int_digits, crossed_unit, parts.sign, opts);
    format!("{grouped}{}{frac}", opts.decimal_symbol)
}

fn fraction_mode(opts: &FormatOptions) -> FractionMode {
    match (opts.precision, opts.significant_figures) {
        (Some(budget), _) => FractionMode::Precision(budget),
        (None, Some(figures)) => FractionMode::Significant(figures),
        (None, None) => FractionMode::Natural,
    }
}

/// Group the integer digits, applying a pending carry from fraction
/// rounding first and reattaching the sign afterwards so no delimiter
/// can touch it.
fn group_integer(digits: &str, carry: bool, sign: i8, opts: &FormatOptions) -> String {
    let digits = if carry {
        increment_digits(digits)
    } else {
        digits.to_string()
    };
    let grouped = insert_delimiters(&digits, opts.group_size, &opts.group_delimiter);
    if sign < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn insert_delimiters(digits: &str, size: usize, delimiter: &str) -> String {
    if size == 0 {
        return digits.to_string();
    }
    let count = digits.len();
    let mut out = String::with_capacity(count + delimiter.len() * (count / size));
    for (i, ch) in digits.chars().enumerate() {
        out.push(ch);
        let remaining = count - i - 1;
        if remaining > 0 && remaining % size == 0 {
            out.push_str(delimiter);
        }
    }
    out
}

/// Abbreviated display for magnitudes past 1000: scale down by a
/// thousands tier and render the mantissa through the fixed-precision
/// path. The mantissa is never grouped and keeps a plain point.
fn render_shortform(opts: &FormatOptions, parts: &NumberParts, float: f64) -> String {
    let tier = ((parts.int_digits.len() - 1) / 3).min(TIER_SUFFIXES.len() - 1);
    let suffix = TIER_SUFFIXES[tier];
    let mantissa = float / 10f64.powi(tier as i32 * 3);

    let budget = opts
        .precision
        .or(opts.significant_figures)
        .unwrap_or(0)
        .min(MAX_FIDELITY_DIGITS);

    let scaled = split_number(Numeric::Float(mantissa));
    let (frac, crossed_unit) =
        round_fraction(&scaled.frac_digits, scaled.scale, FractionMode::Precision(budget));
    let int_digits = if crossed_unit {
        increment_digits(&scaled.int_digits)
    } else {
        scaled.int_digits.clone()
    };
    let sign = if scaled.sign < 0 { "-" } else { "" };
    if budget == 0 {
        format!("{sign}{int_digits}{suffix}")
    } else {
        format!("{sign}{int_digits}.{frac}{suffix}")
    }
}

/// `<mantissa>e<sign><exponent>`, exponent always signed and at least
/// two digits wide.
fn render_exponential(opts: &FormatOptions, value: f64, depth: u8) -> String {
    if let Some(budget) = opts.precision {
        return fix_exponent(&format!("{value:.budget$e}"));
    }
    if let Some(figures) = opts.significant_figures {
        let digits = figures - 1;
        return fix_exponent(&format!("{value:.digits$e}"));
    }

    // 16 fractional digits is the widest a double mantissa carries; the
    // plain pipeline then strips the trailing zeros this leaves behind.
    // Default options keep that delegation from re-entering exponential
    // mode, and the mantissa of a finite double stays inside (-10, 10).
    let wide = format!("{value:.16e}");
    let (mantissa, exponent) = match wide.split_once('e') {
        Some(pair) => pair,
        None => return wide,
    };
    let mantissa: f64 = mantissa.parse().unwrap_or(0.0);
    assert!(mantissa.abs() < 10.0, "exponential mantissa escaped its range");
    let rendered = render(&FormatOptions::default(), Numeric::Float(mantissa), depth + 1);
    format!("{rendered}e{}", pad_exponent(exponent))
}

fn fix_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{mantissa}e{}", pad_exponent(exponent)),
        None => formatted.to_string(),
    }
}

fn pad_exponent(exponent: &str) -> String {
    let value: i32 = exponent.parse().unwrap_or(0);
    format!("{value:+03}")
}

/// Round a value to `figures` significant figures numerically, for the
/// whole-value pass.
fn round_significant(value: f64, figures: usize) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let exponent = value.abs().log10().floor() as i32;
    let shift = figures as i32 - 1 - exponent;
    let factor = 10f64.powi(shift);
    (value * factor).round() / factor
}

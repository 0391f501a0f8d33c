use thiserror::Error;

/// Rendering policy for a single format call.
///
/// Options are plain data; they are validated once when handed to
/// [`NumberFormatter::new`](crate::NumberFormatter::new) and never
/// mutated afterwards, so one instance can back any number of
/// concurrent format calls.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatOptions {
    /// Digits per group in the integer part. 0 disables grouping.
    pub group_size: usize,
    /// Delimiter inserted between digit groups. Must not be `"-"`.
    pub group_delimiter: String,
    /// Symbol used as the decimal point. Must not be `"-"`.
    pub decimal_symbol: String,
    /// Fixed count of digits after the decimal point.
    pub precision: Option<usize>,
    /// Significant figures after the decimal point, counted past any
    /// leading zeros. Mutually exclusive with `precision`.
    pub significant_figures: Option<usize>,
    /// When false, significant figures also apply to values at or
    /// above 1 by rounding the whole value before rendering.
    pub sig_figs_only_below_one: bool,
    /// Render a decimal part even when the value is integral.
    pub show_decimal_if_integer: bool,
    /// Abbreviate large values with k/M/B/T suffixes.
    pub use_shortform: bool,
    /// Use scientific notation at or above `large_threshold`.
    pub use_exponent_for_large: bool,
    pub large_threshold: f64,
    /// Use scientific notation at or below `small_threshold` (zero
    /// itself is never written in scientific notation).
    pub use_exponent_for_small: bool,
    pub small_threshold: f64,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            group_size: 3,
            group_delimiter: ",".to_string(),
            decimal_symbol: ".".to_string(),
            precision: None,
            significant_figures: None,
            sig_figs_only_below_one: true,
            show_decimal_if_integer: false,
            use_shortform: false,
            use_exponent_for_large: false,
            large_threshold: 1e6,
            use_exponent_for_small: false,
            small_threshold: 1e-6,
        }
    }
}

impl FormatOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.group_delimiter == "-" {
            return Err(OptionsError::AmbiguousGroupDelimiter);
        }
        if self.decimal_symbol == "-" {
            return Err(OptionsError::AmbiguousDecimalSymbol);
        }
        if self.significant_figures == Some(0) {
            return Err(OptionsError::ZeroSignificantFigures);
        }
        if self.precision.is_some() && self.significant_figures.is_some() {
            return Err(OptionsError::PrecisionConflict);
        }
        Ok(())
    }
}

/// Rejected option combinations, reported at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("using \"-\" as the digit group delimiter is ambiguous")]
    AmbiguousGroupDelimiter,
    #[error("using \"-\" as the decimal symbol is ambiguous")]
    AmbiguousDecimalSymbol,
    #[error("significant figures must be at least 1")]
    ZeroSignificantFigures,
    #[error("precision and significant figures cannot both be set")]
    PrecisionConflict,
}

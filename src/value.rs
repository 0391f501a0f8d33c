use std::str::FromStr;

use thiserror::Error;

/// A value accepted by the formatter.
///
/// Floats carry the usual double-precision limits; the integer variant
/// preserves inputs past 2^53 exactly (large identifiers, counters,
/// monetary minor units), which matters for grouped full-width display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Numeric {
    Float(f64),
    Int(i128),
}

impl Numeric {
    /// The value as a double, for magnitude classification. Integer
    /// inputs past 2^53 lose their low digits here; exact digits are
    /// recovered from the variant itself during decomposition.
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Float(v) => v,
            Numeric::Int(v) => v as f64,
        }
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Float(v)
    }
}

macro_rules! numeric_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Numeric {
            fn from(v: $ty) -> Self {
                Numeric::Int(v as i128)
            }
        })*
    };
}

numeric_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

/// The input text could not be interpreted as a number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot interpret {input:?} as a number")]
pub struct ParseNumericError {
    input: String,
}

impl FromStr for Numeric {
    type Err = ParseNumericError;

    /// Integer literals stay exact; everything else goes through the
    /// host float parser, which accepts `nan`/`inf`/`infinity` in any
    /// case and with either sign.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(int) = trimmed.parse::<i128>() {
            return Ok(Numeric::Int(int));
        }
        match trimmed.parse::<f64>() {
            Ok(float) => Ok(Numeric::Float(float)),
            Err(_) => Err(ParseNumericError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literals_stay_exact() {
        assert_eq!("12345".parse(), Ok(Numeric::Int(12345)));
        assert_eq!(
            "123456789234567890123".parse(),
            Ok(Numeric::Int(123_456_789_234_567_890_123))
        );
        assert_eq!("-42".parse(), Ok(Numeric::Int(-42)));
        assert_eq!("+7".parse(), Ok(Numeric::Int(7)));
    }

    #[test]
    fn float_literals_parse() {
        assert_eq!("1.5".parse(), Ok(Numeric::Float(1.5)));
        assert_eq!("1.23456e-3".parse(), Ok(Numeric::Float(1.23456e-3)));
    }

    #[test]
    fn overflow_becomes_infinity() {
        assert_eq!("1e500".parse(), Ok(Numeric::Float(f64::INFINITY)));
        assert_eq!("-1e500".parse(), Ok(Numeric::Float(f64::NEG_INFINITY)));
    }

    #[test]
    fn non_finite_tokens_ignore_case() {
        for raw in ["nan", "NaN", "NAN", "-NAN", "+nan"] {
            match raw.parse::<Numeric>() {
                Ok(Numeric::Float(v)) => assert!(v.is_nan(), "{raw}"),
                other => panic!("{raw} parsed as {other:?}"),
            }
        }
        for raw in ["inf", "Inf", "INF", "Infinity", "+infinity"] {
            assert_eq!(raw.parse(), Ok(Numeric::Float(f64::INFINITY)), "{raw}");
        }
        for raw in ["-inf", "-Inf", "-INFINITY"] {
            assert_eq!(raw.parse(), Ok(Numeric::Float(f64::NEG_INFINITY)), "{raw}");
        }
    }

    #[test]
    fn junk_is_a_conversion_error() {
        for raw in ["test", "-", ".", "!", "1.2.3", ""] {
            assert!(raw.parse::<Numeric>().is_err(), "{raw:?}");
        }
    }
}

//! Typed-value synthesis from replacement text.
//!
//! Synthesis is total: text that does not parse, or that parses to a value
//! outside the target type's range, produces the type's zero value. Nothing
//! here returns an error.
//!
//! | Target | Parse | Narrowing |
//! |--------|-------|-----------|
//! | `i8`..`i64`, `isize` | base-10 `i64` | in range, else `0` |
//! | `u8`..`u64`, `usize` | base-10 `u64`, no sign | in range, else `0` |
//! | `i128`, `u128` | as above | widened |
//! | `f64` | `f64` | none |
//! | `f32` | `f64` | `v <= f32::MAX`, else `0.0` |
//! | `Complex<_>` | `a`, `bi`, `a±bi`, optional parens | per part, like floats |
//! | `bool` | `1 t T TRUE true True` / `0 f F FALSE false False` | none |
//! | `char` | first character | `'\0'` when empty |
//! | `String` | verbatim | none |

use crate::complex::Complex;

/// Types that can be built from an annotation's replacement text.
pub trait FromReplacement: Sized {
    /// Builds a value from `text`, falling back to the zero value.
    #[must_use]
    fn from_replacement(text: &str) -> Self;
}

/// Zero-value test used by the idempotence guard.
pub trait IsZero {
    /// Returns `true` if `self` equals the type's zero value.
    fn is_zero(&self) -> bool;
}

fn parse_int(text: &str) -> i64 {
    text.parse().unwrap_or(0)
}

fn parse_uint(text: &str) -> u64 {
    // Unsigned parsing does not accept a sign prefix.
    if text.starts_with('+') {
        return 0;
    }
    text.parse().unwrap_or(0)
}

fn parse_float(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

/// Lossy cast with a single bounds check; out of range becomes zero.
fn narrow<T, U>(value: U) -> T
where
    T: TryFrom<U> + Default,
{
    T::try_from(value).unwrap_or_default()
}

/// Narrows to `f32`, checking the upper bound only.
///
/// Values below `f32::MIN` saturate to negative infinity and precision loss
/// is accepted. `NaN` fails the check and becomes `0.0`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn narrow_f32(value: f64) -> f32 {
    if value <= f64::from(f32::MAX) {
        value as f32
    } else {
        0.0
    }
}

macro_rules! signed {
    ($($ty:ty),*) => {$(
        impl FromReplacement for $ty {
            fn from_replacement(text: &str) -> Self {
                narrow(parse_int(text))
            }
        }
    )*};
}

macro_rules! unsigned {
    ($($ty:ty),*) => {$(
        impl FromReplacement for $ty {
            fn from_replacement(text: &str) -> Self {
                narrow(parse_uint(text))
            }
        }
    )*};
}

signed!(i8, i16, i32, i64, i128, isize);
unsigned!(u8, u16, u32, u64, u128, usize);

impl FromReplacement for f64 {
    fn from_replacement(text: &str) -> Self {
        parse_float(text)
    }
}

impl FromReplacement for f32 {
    fn from_replacement(text: &str) -> Self {
        narrow_f32(parse_float(text))
    }
}

impl FromReplacement for Complex<f64> {
    fn from_replacement(text: &str) -> Self {
        text.parse().unwrap_or_default()
    }
}

impl FromReplacement for Complex<f32> {
    fn from_replacement(text: &str) -> Self {
        let wide = Complex::<f64>::from_replacement(text);
        Complex::new(narrow_f32(wide.re), narrow_f32(wide.im))
    }
}

impl FromReplacement for bool {
    fn from_replacement(text: &str) -> Self {
        matches!(text, "1" | "t" | "T" | "TRUE" | "true" | "True")
    }
}

impl FromReplacement for char {
    fn from_replacement(text: &str) -> Self {
        text.chars().next().unwrap_or_default()
    }
}

impl FromReplacement for String {
    fn from_replacement(text: &str) -> Self {
        text.to_owned()
    }
}

#[cfg(feature = "json")]
impl FromReplacement for serde_json::Number {
    fn from_replacement(text: &str) -> Self {
        if let Ok(value) = text.parse::<i64>() {
            return value.into();
        }
        if let Ok(value) = text.parse::<u64>() {
            return value.into();
        }
        text.parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .unwrap_or_else(|| 0.into())
    }
}

macro_rules! zero_by_default {
    ($($ty:ty),*) => {$(
        impl IsZero for $ty {
            fn is_zero(&self) -> bool {
                *self == <$ty>::default()
            }
        }
    )*};
}

zero_by_default!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String
);

// `-0.0` counts as zero; `NaN` does not.
#[allow(clippy::float_cmp)]
impl IsZero for f32 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

#[allow(clippy::float_cmp)]
impl IsZero for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl<T: IsZero> IsZero for Complex<T> {
    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

#[cfg(feature = "json")]
#[allow(clippy::float_cmp)]
impl IsZero for serde_json::Number {
    fn is_zero(&self) -> bool {
        self.as_f64().is_some_and(|value| value == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{narrow_f32, FromReplacement, IsZero};
    use crate::Complex;

    #[test]
    fn signed_integers_parse_and_narrow() {
        assert_eq!(i8::from_replacement("-128"), i8::MIN);
        assert_eq!(i8::from_replacement("128"), 0);
        assert_eq!(i16::from_replacement("+42"), 42);
        assert_eq!(i64::from_replacement("9223372036854775807"), i64::MAX);
        assert_eq!(i128::from_replacement("-5"), -5);
    }

    #[test]
    fn integer_parse_failure_is_zero() {
        assert_eq!(i32::from_replacement("twelve"), 0);
        assert_eq!(i32::from_replacement(""), 0);
        assert_eq!(i32::from_replacement("1.5"), 0);
        assert_eq!(i64::from_replacement("9223372036854775808"), 0);
    }

    #[test]
    fn unsigned_integers_reject_signs() {
        assert_eq!(u8::from_replacement("255"), u8::MAX);
        assert_eq!(u8::from_replacement("256"), 0);
        assert_eq!(u32::from_replacement("-1"), 0);
        assert_eq!(u32::from_replacement("+1"), 0);
        assert_eq!(u128::from_replacement("18446744073709551615"), u128::from(u64::MAX));
    }

    #[test]
    fn floats_parse_and_narrow_on_upper_bound_only() {
        assert!((f64::from_replacement("2.5") - 2.5).abs() < f64::EPSILON);
        assert!(f64::from_replacement("inf").is_infinite());
        assert!(f32::from_replacement("1e39").is_zero());
        assert_eq!(f32::from_replacement("-1e39"), f32::NEG_INFINITY);
        assert!(narrow_f32(f64::NAN).is_zero());
    }

    #[test]
    fn complex_narrowing_applies_per_part() {
        assert_eq!(
            Complex::<f32>::from_replacement("(1.5+2i)"),
            Complex::new(1.5, 2.0)
        );
        assert_eq!(
            Complex::<f32>::from_replacement("1e39+1i"),
            Complex::new(0.0, 1.0)
        );
        assert_eq!(Complex::<f64>::from_replacement("nope"), Complex::default());
    }

    #[test]
    fn booleans_follow_the_literal_table() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(bool::from_replacement(text), "{text}");
        }
        for text in ["0", "f", "F", "FALSE", "false", "False", "yes", "tRUE", ""] {
            assert!(!bool::from_replacement(text), "{text}");
        }
    }

    #[test]
    fn chars_and_strings() {
        assert_eq!(char::from_replacement("xyz"), 'x');
        assert_eq!(char::from_replacement(""), '\0');
        assert_eq!(String::from_replacement(" raw "), " raw ");
    }

    #[test]
    fn zero_values() {
        assert!(0_u8.is_zero());
        assert!(!1_i64.is_zero());
        assert!((-0.0_f32).is_zero());
        assert!(!f64::NAN.is_zero());
        assert!(Complex::<f64>::default().is_zero());
        assert!(!Complex::new(0.0_f64, 1.0).is_zero());
        assert!('\0'.is_zero());
        assert!(!true.is_zero());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_numbers() {
        use serde_json::Number;

        assert_eq!(Number::from_replacement("-3"), Number::from(-3));
        assert_eq!(
            Number::from_replacement("18446744073709551615"),
            Number::from(u64::MAX)
        );
        assert_eq!(Number::from_replacement("0.5").as_f64(), Some(0.5));
        assert_eq!(Number::from_replacement("NaN"), Number::from(0));
        assert!(Number::from(0).is_zero());
    }
}

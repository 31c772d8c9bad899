use crate::Error;

/// A value that can be parsed from and written to a single text token
pub trait Token: Sized {
    /// Describes the type in error messages
    const EXPECTED: &'static str;

    fn parse_token(token: &str) -> Option<Self>;

    /// Conversion from an already typed integer, as found in property lists
    fn from_integer(value: i64) -> Option<Self>;

    /// Conversion from an already typed real, as found in property lists
    fn from_real(value: f64) -> Option<Self>;

    fn write_token(&self, out: &mut String);

    fn to_token(&self) -> String {
        let mut out = String::new();
        self.write_token(&mut out);
        out
    }
}

/// An enumeration stored as its integer value
pub trait RobTopEnum: Copy + Sized {
    const NAME: &'static str;

    fn from_value(value: i64) -> Option<Self>;

    fn value(self) -> i64;
}

/// Format a float without a trailing `.0` when it is integral
///
/// ```
/// use robtop::text::float_str;
/// assert_eq!(float_str(5.0), "5");
/// assert_eq!(float_str(5.5), "5.5");
/// assert_eq!(float_str(-0.0), "0");
/// ```
pub fn float_str(value: f64) -> String {
    let mut out = String::new();
    write_float(value, &mut out);
    out
}

fn write_float(value: f64, out: &mut String) {
    use std::fmt::Write;
    if value == 0.0 {
        out.push('0');
    } else {
        let _ = write!(out, "{}", value);
    }
}

fn write_float32(value: f32, out: &mut String) {
    use std::fmt::Write;
    if value == 0.0 {
        out.push('0');
    } else {
        let _ = write!(out, "{}", value);
    }
}

/// Booleans are written as `1` and `0`
pub fn bool_str(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Parse a boolean token, where an empty token is false and any other
/// integer is true when nonzero
pub fn int_bool(token: &str) -> Result<bool, Error> {
    bool::parse_token(token).ok_or_else(|| Error::token("", token, bool::EXPECTED))
}

#[cfg(feature = "faster_writer")]
fn write_int<T: itoa::Integer>(value: T, out: &mut String) {
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(value));
}

#[cfg(not(feature = "faster_writer"))]
fn write_int<T: std::fmt::Display>(value: T, out: &mut String) {
    use std::fmt::Write;
    let _ = write!(out, "{}", value);
}

macro_rules! int_token {
    ($($ty:ty),*) => {
        $(
            impl Token for $ty {
                const EXPECTED: &'static str = "an integer";

                #[inline]
                fn parse_token(token: &str) -> Option<Self> {
                    let token = token.trim();
                    token.parse::<$ty>().ok().or_else(|| {
                        // integral floats occasionally show up where ints are expected
                        let x = token.parse::<f64>().ok()?;
                        if x.fract() == 0.0 {
                            Self::from_real(x)
                        } else {
                            None
                        }
                    })
                }

                #[inline]
                fn from_integer(value: i64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                #[inline]
                fn from_real(value: f64) -> Option<Self> {
                    if value.is_finite() {
                        <$ty>::try_from(value.trunc() as i64).ok()
                    } else {
                        None
                    }
                }

                #[inline]
                fn write_token(&self, out: &mut String) {
                    write_int(*self, out)
                }
            }
        )*
    };
}

int_token!(i8, u8, i16, u16, i32, u32, i64);

impl Token for f64 {
    const EXPECTED: &'static str = "a float";

    fn parse_token(token: &str) -> Option<Self> {
        token.trim().parse::<f64>().ok()
    }

    fn from_integer(value: i64) -> Option<Self> {
        Some(value as f64)
    }

    fn from_real(value: f64) -> Option<Self> {
        Some(value)
    }

    fn write_token(&self, out: &mut String) {
        write_float(*self, out)
    }
}

impl Token for f32 {
    const EXPECTED: &'static str = "a float";

    fn parse_token(token: &str) -> Option<Self> {
        token.trim().parse::<f32>().ok()
    }

    fn from_integer(value: i64) -> Option<Self> {
        Some(value as f32)
    }

    fn from_real(value: f64) -> Option<Self> {
        Some(value as f32)
    }

    fn write_token(&self, out: &mut String) {
        write_float32(*self, out)
    }
}

impl Token for bool {
    const EXPECTED: &'static str = "a boolean";

    fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            Some(false)
        } else {
            i64::parse_token(token).map(|x| x != 0)
        }
    }

    fn from_integer(value: i64) -> Option<Self> {
        Some(value != 0)
    }

    fn from_real(value: f64) -> Option<Self> {
        Some(value != 0.0)
    }

    fn write_token(&self, out: &mut String) {
        out.push_str(bool_str(*self))
    }
}

impl Token for String {
    const EXPECTED: &'static str = "a string";

    fn parse_token(token: &str) -> Option<Self> {
        Some(token.to_string())
    }

    fn from_integer(value: i64) -> Option<Self> {
        Some(value.to_string())
    }

    fn from_real(value: f64) -> Option<Self> {
        Some(float_str(value))
    }

    fn write_token(&self, out: &mut String) {
        out.push_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case(1.0, "1")]
    #[case(0.5, "0.5")]
    #[case(-90.0, "-90")]
    #[case(1e-3, "0.001")]
    fn float_tokens(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(float_str(input), expected);
        assert_eq!(f64::parse_token(expected), Some(input));
    }

    #[rstest]
    #[case("", Some(false))]
    #[case("0", Some(false))]
    #[case("1", Some(true))]
    #[case("2", Some(true))]
    #[case("-1", Some(true))]
    #[case("yes", None)]
    fn bool_tokens(#[case] input: &str, #[case] expected: Option<bool>) {
        assert_eq!(bool::parse_token(input), expected);
    }

    #[test]
    fn integral_float_as_int() {
        assert_eq!(i32::parse_token("12.0"), Some(12));
        assert_eq!(i32::parse_token("12.5"), None);
        assert_eq!(u8::parse_token("256"), None);
    }

    #[quickcheck]
    fn f32_token_round_trip(x: f32) -> bool {
        if !x.is_finite() {
            return true;
        }
        let token = x.to_token();
        !token.ends_with(".0") && f32::parse_token(&token) == Some(if x == 0.0 { 0.0 } else { x })
    }

    #[quickcheck]
    fn i64_token_round_trip(x: i64) -> bool {
        i64::parse_token(&x.to_token()) == Some(x)
    }
}

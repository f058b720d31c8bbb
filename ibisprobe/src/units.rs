//! Engineering notation for parasitic values.
//!
//! IBIS tables store values either as plain floats (`2.1e-9`) or with a
//! scale suffix and unit (`2.1nH`). Both are read into farads/henries and
//! rendered back scaled to a power-of-1000 SI prefix between tera and pico.

use std::fmt;

/// Errors converting raw IBIS tokens into numbers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitsError {
    #[error("Non-numeric value for {field}: '{value}'")]
    NonNumericValue { field: String, value: String },
}

/// SI magnitude prefixes supported by the formatter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiPrefix {
    Tera,
    Giga,
    Mega,
    Kilo,
    None,
    Milli,
    Micro,
    Nano,
    Pico,
}

impl SiPrefix {
    #[inline]
    pub fn exponent(self) -> i32 {
        match self {
            SiPrefix::Tera => 12,
            SiPrefix::Giga => 9,
            SiPrefix::Mega => 6,
            SiPrefix::Kilo => 3,
            SiPrefix::None => 0,
            SiPrefix::Milli => -3,
            SiPrefix::Micro => -6,
            SiPrefix::Nano => -9,
            SiPrefix::Pico => -12,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SiPrefix::Tera => "T",
            SiPrefix::Giga => "G",
            SiPrefix::Mega => "M",
            SiPrefix::Kilo => "k",
            SiPrefix::None => "",
            SiPrefix::Milli => "m",
            SiPrefix::Micro => "u",
            SiPrefix::Nano => "n",
            SiPrefix::Pico => "p",
        }
    }

    pub fn from_exponent(exponent: i32) -> Option<Self> {
        match exponent {
            12 => Some(SiPrefix::Tera),
            9 => Some(SiPrefix::Giga),
            6 => Some(SiPrefix::Mega),
            3 => Some(SiPrefix::Kilo),
            0 => Some(SiPrefix::None),
            -3 => Some(SiPrefix::Milli),
            -6 => Some(SiPrefix::Micro),
            -9 => Some(SiPrefix::Nano),
            -12 => Some(SiPrefix::Pico),
            _ => None,
        }
    }

    /// Next prefix up (×1000), `None` at tera.
    fn larger(self) -> Option<Self> {
        Self::from_exponent(self.exponent() + 3)
    }

    /// Next prefix down (÷1000), `None` at pico.
    fn smaller(self) -> Option<Self> {
        Self::from_exponent(self.exponent() - 3)
    }
}

/// A value split into mantissa and SI prefix.
///
/// `1 <= |mantissa| < 1000` unless the value lies outside the tera..pico
/// range, in which case the prefix is clamped and the mantissa carries the rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineeringValue {
    pub mantissa: f64,
    pub prefix: SiPrefix,
}

impl EngineeringValue {
    pub fn from_f64(value: f64) -> Self {
        // The down-scaling loop would otherwise walk zero all the way to pico.
        if value == 0.0 {
            return Self {
                mantissa: 0.0,
                prefix: SiPrefix::None,
            };
        }

        let mut mantissa = value;
        let mut prefix = SiPrefix::None;

        while mantissa.abs() >= 1000.0 {
            match prefix.larger() {
                Some(next) => {
                    mantissa /= 1000.0;
                    prefix = next;
                }
                None => break,
            }
        }
        while mantissa.abs() < 1.0 {
            match prefix.smaller() {
                Some(next) => {
                    mantissa *= 1000.0;
                    prefix = next;
                }
                None => break,
            }
        }

        Self { mantissa, prefix }
    }

    #[inline]
    pub fn exponent(&self) -> i32 {
        self.prefix.exponent()
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.mantissa * 10f64.powi(self.exponent())
    }
}

impl fmt::Display for EngineeringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {}", self.mantissa, self.prefix.symbol())
    }
}

/// Multiplier for an IBIS scale letter. Case-sensitive: `M` is mega, `m` milli.
fn scale_factor(letter: char) -> Option<f64> {
    match letter {
        'T' => Some(1e12),
        'G' => Some(1e9),
        'M' => Some(1e6),
        'k' => Some(1e3),
        'm' => Some(1e-3),
        'u' => Some(1e-6),
        'n' => Some(1e-9),
        'p' => Some(1e-12),
        'f' => Some(1e-15),
        _ => None,
    }
}

/// Longest leading slice of `s` that parses as a float, plus the remainder.
fn split_numeric_prefix(s: &str) -> Option<(f64, &str)> {
    (1..s.len())
        .rev()
        .filter(|&idx| s.is_char_boundary(idx))
        .find_map(|idx| s[..idx].parse::<f64>().ok().map(|n| (n, &s[idx..])))
}

/// Parse a raw IBIS token into a float.
///
/// Accepts plain floats (`1e-9`) and suffixed values (`2.7pF`, `5nH`). After
/// the number, an optional scale letter is applied and any remaining letters
/// are taken as the unit and ignored.
pub fn parse_value(field: &str, raw: &str) -> Result<f64, UnitsError> {
    let s = raw.trim();
    let non_numeric = || UnitsError::NonNumericValue {
        field: field.to_string(),
        value: raw.to_string(),
    };

    if let Ok(value) = s.parse::<f64>() {
        return Ok(value);
    }

    let (number, suffix) = split_numeric_prefix(s).ok_or_else(non_numeric)?;
    if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(non_numeric());
    }

    let multiplier = suffix.chars().next().and_then(scale_factor).unwrap_or(1.0);
    Ok(number * multiplier)
}

/// Render a float as `"M.mmm P"` (prefix symbol empty for unity).
pub fn format_value(value: f64) -> String {
    EngineeringValue::from_f64(value).to_string()
}

/// Parse a raw token and render it in engineering notation.
///
/// `field` names the value in the error when the token is not numeric.
pub fn format_engineering(field: &str, raw: &str) -> Result<String, UnitsError> {
    parse_value(field, raw).map(format_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str) -> String {
        format_engineering("test", raw).unwrap()
    }

    #[test]
    fn test_format_reference_values() {
        assert_eq!(fmt("1000"), "1.000 k");
        assert_eq!(fmt("0.000001"), "1.000 u");
        assert_eq!(fmt("1"), "1.000 ");
        assert_eq!(fmt("999"), "999.000 ");
        assert_eq!(fmt("1e13"), "10.000 T");
        assert_eq!(fmt("0.0012"), "1.200 m");
        assert_eq!(fmt("-4700"), "-4.700 k");
    }

    #[test]
    fn test_format_clamps_at_range_edges() {
        assert_eq!(fmt("2e15"), "2000.000 T");
        assert_eq!(fmt("5e-15"), "0.005 p");
        assert_eq!(fmt("0.5e-9"), "500.000 p");
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(fmt("0"), "0.000 ");
        assert_eq!(EngineeringValue::from_f64(0.0).prefix, SiPrefix::None);
    }

    #[test]
    fn test_engineering_value_parts() {
        let v = EngineeringValue::from_f64(2.7e-12);
        assert_eq!(v.prefix, SiPrefix::Pico);
        assert_eq!(v.exponent(), -12);
        assert!((v.mantissa - 2.7).abs() < 1e-9);
        assert!((v.to_f64() - 2.7e-12).abs() < 1e-21);
    }

    #[test]
    fn test_non_finite_values_terminate() {
        assert_eq!(format_value(f64::INFINITY), "inf T");
        assert_eq!(format_value(f64::NAN), "NaN ");
    }

    #[test]
    fn test_parse_value_with_suffix() {
        assert!((parse_value("c", "2.7pF").unwrap() - 2.7e-12).abs() < 1e-21);
        assert!((parse_value("l", "5nH").unwrap() - 5e-9).abs() < 1e-18);
        assert!((parse_value("r", "10k").unwrap() - 10e3).abs() < 1e-6);
        assert!((parse_value("r", "1.5m").unwrap() - 1.5e-3).abs() < 1e-15);
        assert!((parse_value("r", "2M").unwrap() - 2e6).abs() < 1e-6);
        assert!((parse_value("c", "3f").unwrap() - 3e-15).abs() < 1e-24);
        assert!((parse_value("c", "1e-9F").unwrap() - 1e-9).abs() < 1e-18);
        // Uppercase F is the farad unit, not femto.
        assert_eq!(parse_value("c", "1F").unwrap(), 1.0);
        assert_eq!(parse_value("c", " 3.3 ").unwrap(), 3.3);
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        let err = parse_value("C_comp", "NA").unwrap_err();
        assert_eq!(
            err,
            UnitsError::NonNumericValue {
                field: "C_comp".to_string(),
                value: "NA".to_string(),
            }
        );
        assert!(err.to_string().contains("C_comp"));

        assert!(parse_value("x", "").is_err());
        assert!(parse_value("x", "abc").is_err());
        assert!(parse_value("x", "1.2.3").is_err());
        assert!(parse_value("x", "2p/F").is_err());
    }

    #[test]
    fn test_format_suffixed_tokens() {
        assert_eq!(fmt("2.7pF"), "2.700 p");
        assert_eq!(fmt("2.1nH"), "2.100 n");
        // Sub-pico values stay at the pico boundary.
        assert_eq!(fmt("0.4pF"), "0.400 p");
    }

    #[test]
    fn test_prefix_table_round_trips() {
        for exp in (-12..=12).step_by(3) {
            let prefix = SiPrefix::from_exponent(exp).unwrap();
            assert_eq!(prefix.exponent(), exp);
        }
        assert!(SiPrefix::from_exponent(15).is_none());
        assert!(SiPrefix::from_exponent(1).is_none());
    }
}

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

use super::{Decimal, MAX_EXPONENT, MIN_EXPONENT, Sign};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("cannot parse decimal from empty string")]
    Empty,
    #[error("invalid character {0:?} in decimal literal")]
    InvalidDigit(char),
    #[error("decimal literal has no digits")]
    NoDigits,
    #[error("decimal exponent out of range")]
    ExponentOverflow,
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Decimal, ParseDecimalError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        let (sign, body) = match s.as_bytes()[0] {
            b'-' => (Sign::Neg, &s[1..]),
            b'+' => (Sign::Pos, &s[1..]),
            _ => (Sign::Pos, s),
        };

        if body.eq_ignore_ascii_case("nan") {
            return Ok(Decimal::NaN);
        }
        if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
            return Ok(Decimal::Infinite(sign));
        }

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(i) => (&body[..i], Some(&body[i + 1..])),
            None => (body, None),
        };

        let mut digits = String::with_capacity(mantissa.len());
        let mut frac_len: i64 = 0;
        let mut seen_point = false;
        for c in mantissa.chars() {
            match c {
                '0'..='9' => {
                    digits.push(c);
                    if seen_point {
                        frac_len += 1;
                    }
                }
                '.' if !seen_point => seen_point = true,
                other => return Err(ParseDecimalError::InvalidDigit(other)),
            }
        }
        if digits.is_empty() {
            return Err(ParseDecimalError::NoDigits);
        }

        let exp = match exponent {
            Some(e) => parse_exponent(e)?,
            None => 0,
        };
        let exp = exp
            .checked_sub(frac_len)
            .filter(|e| (MIN_EXPONENT..=MAX_EXPONENT).contains(e))
            .ok_or(ParseDecimalError::ExponentOverflow)?;
        let coeff = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(ParseDecimalError::NoDigits)?;
        Ok(Decimal::new(sign, coeff, exp))
    }
}

fn parse_exponent(e: &str) -> Result<i64, ParseDecimalError> {
    let (neg, digits) = match e.as_bytes().first() {
        Some(b'-') => (true, &e[1..]),
        Some(b'+') => (false, &e[1..]),
        Some(_) => (false, e),
        None => return Err(ParseDecimalError::NoDigits),
    };
    if digits.is_empty() {
        return Err(ParseDecimalError::NoDigits);
    }
    let mut v: i64 = 0;
    for c in digits.chars() {
        let d = c.to_digit(10).ok_or(ParseDecimalError::InvalidDigit(c))?;
        v = v
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(d)))
            .ok_or(ParseDecimalError::ExponentOverflow)?;
    }
    Ok(if neg { -v } else { v })
}

/// Scientific-string form: plain notation while the exponent is not
/// positive and the value is not smaller than 1E-6, exponent form otherwise.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, coeff, exp) = match self {
            Decimal::NaN => return f.write_str("NaN"),
            Decimal::Infinite(Sign::Pos) => return f.write_str("Infinity"),
            Decimal::Infinite(Sign::Neg) => return f.write_str("-Infinity"),
            Decimal::Finite { sign, coeff, exp } => (*sign, coeff, *exp),
        };
        if sign.is_negative() {
            f.write_str("-")?;
        }
        let digits = if coeff.is_zero() {
            "0".to_string()
        } else {
            coeff.to_str_radix(10)
        };
        let len = digits.len() as i64;
        let adjusted = exp + len - 1;

        if exp <= 0 && adjusted >= -6 {
            if exp == 0 {
                return f.write_str(&digits);
            }
            let int_len = len + exp;
            return if int_len > 0 {
                let (int, frac) = digits.split_at(int_len as usize);
                write!(f, "{int}.{frac}")
            } else {
                write!(f, "0.{}{digits}", "0".repeat((-int_len) as usize))
            };
        }

        let (lead, rest) = digits.split_at(1);
        f.write_str(lead)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        if adjusted >= 0 {
            write!(f, "E+{adjusted}")
        } else {
            write!(f, "E{adjusted}")
        }
    }
}

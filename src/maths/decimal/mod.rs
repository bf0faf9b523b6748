//! Arbitrary-precision decimal floating point.
//!
//! A finite value is `(-1)^sign * coeff * 10^exp` with an unbounded
//! coefficient. Zero keeps its sign, and NaN and the two infinities are
//! variants of the same enum, so every dispatch over special values is a
//! plain exhaustive `match`.

mod arith;
mod big;
mod context;
mod text;

pub(crate) use arith::finish;
pub use big::Big;
pub use context::{Context, ContextError, Rounding};
pub use text::ParseDecimalError;

use core::cmp::Ordering;
use core::ops::Neg;

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Largest exponent a finite value carries; larger results overflow to
/// infinity.
pub const MAX_EXPONENT: i64 = 999_999_999_999_999_999;
/// Smallest exponent a finite value carries; results are rounded at
/// `10^MIN_EXPONENT` below it.
pub const MIN_EXPONENT: i64 = -MAX_EXPONENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    #[inline]
    pub fn is_negative(self) -> bool {
        self == Sign::Neg
    }

    #[inline]
    pub(crate) fn from_negative(neg: bool) -> Sign {
        if neg { Sign::Neg } else { Sign::Pos }
    }
}

impl Neg for Sign {
    type Output = Sign;

    #[inline]
    fn neg(self) -> Sign {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}

/// Coarse shape of a value, the key of every special-value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    NaN,
    Zero(Sign),
    Finite(Sign),
    Infinite(Sign),
}

#[derive(Debug, Clone)]
pub enum Decimal {
    Finite { sign: Sign, coeff: BigUint, exp: i64 },
    Infinite(Sign),
    NaN,
}

impl Decimal {
    #[inline]
    pub fn nan() -> Decimal {
        Decimal::NaN
    }

    #[inline]
    pub fn infinity(sign: Sign) -> Decimal {
        Decimal::Infinite(sign)
    }

    #[inline]
    pub fn zero(sign: Sign) -> Decimal {
        Decimal::Finite {
            sign,
            coeff: BigUint::zero(),
            exp: 0,
        }
    }

    #[inline]
    pub fn one() -> Decimal {
        Decimal::new(Sign::Pos, BigUint::one(), 0)
    }

    /// `(-1)^sign * coeff * 10^exp`. An exponent above `MAX_EXPONENT`
    /// gives a signed infinity (or a zero pinned at `MAX_EXPONENT`); one
    /// below `MIN_EXPONENT` drops the digits that fall under it.
    pub fn new(sign: Sign, coeff: BigUint, exp: i64) -> Decimal {
        if exp > MAX_EXPONENT {
            return if coeff.is_zero() {
                Decimal::Finite {
                    sign,
                    coeff,
                    exp: MAX_EXPONENT,
                }
            } else {
                Decimal::Infinite(sign)
            };
        }
        if exp < MIN_EXPONENT {
            let gap = MIN_EXPONENT.abs_diff(exp);
            let coeff = if gap >= digit_count(&coeff) {
                BigUint::zero()
            } else {
                coeff / pow10(gap)
            };
            return Decimal::Finite {
                sign,
                coeff,
                exp: MIN_EXPONENT,
            };
        }
        Decimal::Finite { sign, coeff, exp }
    }

    pub fn class(&self) -> Class {
        match self {
            Decimal::NaN => Class::NaN,
            Decimal::Infinite(sign) => Class::Infinite(*sign),
            Decimal::Finite { sign, coeff, .. } if coeff.is_zero() => Class::Zero(*sign),
            Decimal::Finite { sign, .. } => Class::Finite(*sign),
        }
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self, Decimal::NaN)
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Decimal::Infinite(_))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self, Decimal::Finite { .. })
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self, Decimal::Finite { coeff, .. } if coeff.is_zero())
    }

    /// Sign bit; `None` for NaN.
    #[inline]
    pub fn sign(&self) -> Option<Sign> {
        match self {
            Decimal::NaN => None,
            Decimal::Infinite(sign) | Decimal::Finite { sign, .. } => Some(*sign),
        }
    }

    #[inline]
    pub fn is_sign_negative(&self) -> bool {
        self.sign() == Some(Sign::Neg)
    }

    #[inline]
    pub fn is_sign_positive(&self) -> bool {
        self.sign() == Some(Sign::Pos)
    }

    /// Number of digits in the coefficient (1 for zero); `None` unless finite.
    pub fn digits(&self) -> Option<u64> {
        match self {
            Decimal::Finite { coeff, .. } => Some(digit_count(coeff)),
            _ => None,
        }
    }

    /// Exponent of the most significant digit, so that
    /// `10^adjusted <= |x| < 10^(adjusted + 1)`; `None` unless finite.
    pub fn adjusted(&self) -> Option<i64> {
        match self {
            Decimal::Finite { coeff, exp, .. } => {
                Some(exp.saturating_add(digit_count(coeff) as i64 - 1))
            }
            _ => None,
        }
    }

    pub fn abs(&self) -> Decimal {
        self.clone().with_sign(Sign::Pos)
    }

    /// Replaces the sign bit; NaN is returned unchanged.
    pub fn with_sign(self, sign: Sign) -> Decimal {
        match self {
            Decimal::NaN => Decimal::NaN,
            Decimal::Infinite(_) => Decimal::Infinite(sign),
            Decimal::Finite { coeff, exp, .. } => Decimal::Finite { sign, coeff, exp },
        }
    }

    /// Compares magnitudes; NaN is unordered.
    pub fn cmp_abs(&self, other: &Decimal) -> Option<Ordering> {
        match (self, other) {
            (Decimal::NaN, _) | (_, Decimal::NaN) => None,
            (Decimal::Infinite(_), Decimal::Infinite(_)) => Some(Ordering::Equal),
            (Decimal::Infinite(_), Decimal::Finite { .. }) => Some(Ordering::Greater),
            (Decimal::Finite { .. }, Decimal::Infinite(_)) => Some(Ordering::Less),
            (
                Decimal::Finite {
                    coeff: ca, exp: ea, ..
                },
                Decimal::Finite {
                    coeff: cb, exp: eb, ..
                },
            ) => Some(cmp_magnitude(ca, *ea, cb, *eb)),
        }
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        match self.sign() {
            Some(sign) => self.with_sign(-sign),
            None => self,
        }
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -self.clone()
    }
}

impl From<u64> for Decimal {
    fn from(v: u64) -> Decimal {
        Decimal::new(Sign::Pos, BigUint::from(v), 0)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Decimal {
        Decimal::new(
            Sign::from_negative(v < 0),
            BigUint::from(v.unsigned_abs()),
            0,
        )
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Decimal) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        let (sa, sb) = match (self.class(), other.class()) {
            (Class::NaN, _) | (_, Class::NaN) => return None,
            (Class::Zero(_), Class::Zero(_)) => return Some(Ordering::Equal),
            (a, b) => (signum(a), signum(b)),
        };
        if sa != sb {
            return Some(sa.cmp(&sb));
        }
        let mag = self.cmp_abs(other)?;
        Some(if sa < 0 { mag.reverse() } else { mag })
    }
}

fn signum(class: Class) -> i8 {
    match class {
        Class::Zero(_) | Class::NaN => 0,
        Class::Finite(Sign::Pos) | Class::Infinite(Sign::Pos) => 1,
        Class::Finite(Sign::Neg) | Class::Infinite(Sign::Neg) => -1,
    }
}

fn cmp_magnitude(ca: &BigUint, ea: i64, cb: &BigUint, eb: i64) -> Ordering {
    match (ca.is_zero(), cb.is_zero()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    let adj_a = i128::from(ea) + i128::from(digit_count(ca));
    let adj_b = i128::from(eb) + i128::from(digit_count(cb));
    if adj_a != adj_b {
        return adj_a.cmp(&adj_b);
    }
    // Same leading position: the exponent gap is bounded by the digit counts.
    match ea.cmp(&eb) {
        Ordering::Equal => ca.cmp(cb),
        Ordering::Greater => (ca * pow10((ea - eb) as u64)).cmp(cb),
        Ordering::Less => ca.cmp(&(cb * pow10((eb - ea) as u64))),
    }
}

#[inline]
pub(crate) fn pow10(n: u64) -> BigUint {
    BigUint::from(10u32).pow(n as u32)
}

/// Decimal digits of `c`; zero counts as one digit.
pub(crate) fn digit_count(c: &BigUint) -> u64 {
    if c.is_zero() {
        return 1;
    }
    // 1233 / 4096 < log10(2), so the estimate never overshoots.
    let mut d = (((c.bits() - 1) * 1233) >> 12) + 1;
    while *c >= pow10(d) {
        d += 1;
    }
    d
}

/// Decimal length of a machine integer.
#[inline]
pub(crate) fn len10(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

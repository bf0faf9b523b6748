//! Elementary operations, each rounded exactly once to a context.
//!
//! Exact intermediates are built on `BigUint`; division and square root
//! produce at least two digits beyond the precision plus a sticky flag, so
//! the single rounding step sees the true position of the tail.

use core::cmp::Ordering;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::{Context, Decimal, MAX_EXPONENT, MIN_EXPONENT, Rounding, Sign, digit_count, pow10};

impl Rounding {
    /// Whether the kept digits are bumped by one unit. `half` compares the
    /// discarded tail against half a unit.
    fn rounds_away(self, sign: Sign, half: Ordering, inexact: bool, odd: bool) -> bool {
        match self {
            Rounding::HalfEven => half == Ordering::Greater || (half == Ordering::Equal && odd),
            Rounding::HalfUp => half != Ordering::Less,
            Rounding::HalfDown => half == Ordering::Greater,
            Rounding::ToZero => false,
            Rounding::AwayFromZero => inexact,
            Rounding::Ceiling => inexact && sign == Sign::Pos,
            Rounding::Floor => inexact && sign == Sign::Neg,
        }
    }
}

#[inline]
fn product_sign(a: Sign, b: Sign) -> Sign {
    Sign::from_negative(a.is_negative() != b.is_negative())
}

#[inline]
fn zero_sum_sign(ctx: &Context) -> Sign {
    if ctx.rounding() == Rounding::Floor {
        Sign::Neg
    } else {
        Sign::Pos
    }
}

/// Rounds `coeff * 10^exp` to the context precision. `sticky` marks a
/// nonzero tail strictly below one unit of the last digit of `coeff`.
///
/// Digits below `10^MIN_EXPONENT` are rounded away as well; a result whose
/// exponent ends above `MAX_EXPONENT` overflows to a signed infinity.
pub(crate) fn finish(sign: Sign, coeff: BigUint, exp: i64, sticky: bool, ctx: &Context) -> Decimal {
    let prec = ctx.precision() as u64;
    let digits = digit_count(&coeff);
    let under = if exp < MIN_EXPONENT {
        MIN_EXPONENT.abs_diff(exp)
    } else {
        0
    };
    if digits <= prec && under == 0 && !sticky {
        return Decimal::new(sign, coeff, exp);
    }
    let drop = digits.saturating_sub(prec).max(under);
    let (mut q, half, inexact) = if drop > digits {
        // Everything sits below the kept position, under half a unit.
        let inexact = sticky || !coeff.is_zero();
        (BigUint::zero(), Ordering::Less, inexact)
    } else {
        let divisor = pow10(drop);
        let (q, r) = coeff.div_rem(&divisor);
        let half = match (&r << 1u32).cmp(&divisor) {
            Ordering::Equal if sticky => Ordering::Greater,
            other => other,
        };
        (q, half, sticky || !r.is_zero())
    };
    let mut exp = exp.saturating_add(drop as i64);
    if ctx.rounding().rounds_away(sign, half, inexact, q.is_odd()) {
        q += 1u32;
        if digit_count(&q) > prec {
            q /= 10u32;
            exp += 1;
        }
    }
    if exp > MAX_EXPONENT && !q.is_zero() {
        return Decimal::Infinite(sign);
    }
    Decimal::new(sign, q, exp)
}

/// Drops trailing zeros of an exact result while its exponent stays at or
/// below `ideal`.
fn strip_zeros(mut coeff: BigUint, mut exp: i64, ideal: i64) -> (BigUint, i64) {
    if coeff.is_zero() {
        return (coeff, exp.max(ideal));
    }
    while exp < ideal {
        let (q, r) = coeff.div_rem(&BigUint::from(10u32));
        if !r.is_zero() {
            break;
        }
        coeff = q;
        exp += 1;
    }
    (coeff, exp)
}

impl Decimal {
    /// Rounds to the context; NaN and infinities pass through.
    pub fn round(&self, ctx: &Context) -> Decimal {
        match self {
            Decimal::Finite { sign, coeff, exp } => finish(*sign, coeff.clone(), *exp, false, ctx),
            special => special.clone(),
        }
    }

    pub fn add(&self, other: &Decimal, ctx: &Context) -> Decimal {
        match (self, other) {
            (Decimal::NaN, _) | (_, Decimal::NaN) => Decimal::NaN,
            (Decimal::Infinite(a), Decimal::Infinite(b)) => {
                if a == b {
                    Decimal::Infinite(*a)
                } else {
                    Decimal::NaN
                }
            }
            (Decimal::Infinite(s), _) | (_, Decimal::Infinite(s)) => Decimal::Infinite(*s),
            (
                Decimal::Finite {
                    sign: sa,
                    coeff: ca,
                    exp: ea,
                },
                Decimal::Finite {
                    sign: sb,
                    coeff: cb,
                    exp: eb,
                },
            ) => add_finite(*sa, ca, *ea, *sb, cb, *eb, ctx),
        }
    }

    pub fn sub(&self, other: &Decimal, ctx: &Context) -> Decimal {
        self.add(&-other, ctx)
    }

    pub fn mul(&self, other: &Decimal, ctx: &Context) -> Decimal {
        match (self, other) {
            (Decimal::NaN, _) | (_, Decimal::NaN) => Decimal::NaN,
            (Decimal::Infinite(sa), Decimal::Infinite(sb)) => {
                Decimal::Infinite(product_sign(*sa, *sb))
            }
            (Decimal::Infinite(sa), Decimal::Finite { sign: sb, coeff, .. })
            | (Decimal::Finite { sign: sb, coeff, .. }, Decimal::Infinite(sa)) => {
                if coeff.is_zero() {
                    Decimal::NaN
                } else {
                    Decimal::Infinite(product_sign(*sa, *sb))
                }
            }
            (
                Decimal::Finite {
                    sign: sa,
                    coeff: ca,
                    exp: ea,
                },
                Decimal::Finite {
                    sign: sb,
                    coeff: cb,
                    exp: eb,
                },
            ) => finish(product_sign(*sa, *sb), ca * cb, ea.saturating_add(*eb), false, ctx),
        }
    }

    pub fn div(&self, other: &Decimal, ctx: &Context) -> Decimal {
        match (self, other) {
            (Decimal::NaN, _) | (_, Decimal::NaN) => Decimal::NaN,
            (Decimal::Infinite(_), Decimal::Infinite(_)) => Decimal::NaN,
            (Decimal::Infinite(sa), Decimal::Finite { sign: sb, .. }) => {
                Decimal::Infinite(product_sign(*sa, *sb))
            }
            (Decimal::Finite { sign: sa, .. }, Decimal::Infinite(sb)) => {
                Decimal::zero(product_sign(*sa, *sb))
            }
            (
                Decimal::Finite {
                    sign: sa,
                    coeff: ca,
                    exp: ea,
                },
                Decimal::Finite {
                    sign: sb,
                    coeff: cb,
                    exp: eb,
                },
            ) => {
                let sign = product_sign(*sa, *sb);
                if cb.is_zero() {
                    return if ca.is_zero() {
                        Decimal::NaN
                    } else {
                        Decimal::Infinite(sign)
                    };
                }
                div_finite(sign, ca, *ea, cb, *eb, ctx)
            }
        }
    }

    /// Square root; `sqrt(-0) = -0`, negative operands give NaN.
    pub fn sqrt(&self, ctx: &Context) -> Decimal {
        match self {
            Decimal::NaN | Decimal::Infinite(Sign::Neg) => Decimal::NaN,
            Decimal::Infinite(Sign::Pos) => Decimal::Infinite(Sign::Pos),
            Decimal::Finite { sign, coeff, exp } if coeff.is_zero() => {
                Decimal::new(*sign, BigUint::zero(), exp.div_euclid(2))
            }
            Decimal::Finite {
                sign: Sign::Neg, ..
            } => Decimal::NaN,
            Decimal::Finite {
                sign: Sign::Pos,
                coeff,
                exp,
            } => {
                let prec = ctx.precision() as u64;
                let mut shift = (2 * (prec + 2)).saturating_sub(digit_count(coeff));
                if exp.saturating_sub(shift as i64).rem_euclid(2) != 0 {
                    shift += 1;
                }
                let n = coeff * pow10(shift);
                let root = n.sqrt();
                let sticky = &root * &root != n;
                let root_exp = exp.saturating_sub(shift as i64) / 2;
                if sticky {
                    finish(Sign::Pos, root, root_exp, true, ctx)
                } else {
                    let (root, root_exp) = strip_zeros(root, root_exp, exp.div_euclid(2));
                    finish(Sign::Pos, root, root_exp, false, ctx)
                }
            }
        }
    }

    /// Multiplies by `2^k` with a single rounding.
    pub(crate) fn mul_pow2(&self, k: u32, ctx: &Context) -> Decimal {
        match self {
            Decimal::Finite { sign, coeff, exp } => finish(*sign, coeff << k, *exp, false, ctx),
            special => special.clone(),
        }
    }
}

fn add_finite(
    sa: Sign,
    ca: &BigUint,
    ea: i64,
    sb: Sign,
    cb: &BigUint,
    eb: i64,
    ctx: &Context,
) -> Decimal {
    match (ca.is_zero(), cb.is_zero()) {
        (true, true) => {
            let sign = if sa == sb { sa } else { zero_sum_sign(ctx) };
            return Decimal::new(sign, BigUint::zero(), ea.min(eb));
        }
        (true, false) => return finish(sb, cb.clone(), eb, false, ctx),
        (false, true) => return finish(sa, ca.clone(), ea, false, ctx),
        (false, false) => {}
    }

    let adj_a = ea.saturating_add(digit_count(ca) as i64 - 1);
    let adj_b = eb.saturating_add(digit_count(cb) as i64 - 1);
    if adj_a < adj_b {
        return add_finite(sb, cb, eb, sa, ca, ea, ctx);
    }

    // An operand lying entirely below both the last digit of `a` and the
    // rounding position only contributes a sticky unit; substitute one so the
    // alignment below stays bounded by the precision.
    let floor = ea.min(adj_a.saturating_sub(ctx.precision() as i64 + 2));
    let unit = BigUint::one();
    let (cb, eb) = if adj_b < floor.saturating_sub(1) {
        (&unit, floor.saturating_sub(1))
    } else {
        (cb, eb)
    };

    let e = ea.min(eb);
    let xa = ca * pow10((ea - e) as u64);
    let xb = cb * pow10((eb - e) as u64);
    let (sign, coeff) = if sa == sb {
        (sa, xa + xb)
    } else {
        match xa.cmp(&xb) {
            Ordering::Greater => (sa, xa - xb),
            Ordering::Less => (sb, xb - xa),
            Ordering::Equal => (zero_sum_sign(ctx), BigUint::zero()),
        }
    };
    finish(sign, coeff, e, false, ctx)
}

fn div_finite(sign: Sign, ca: &BigUint, ea: i64, cb: &BigUint, eb: i64, ctx: &Context) -> Decimal {
    let ideal = ea.saturating_sub(eb);
    if ca.is_zero() {
        return Decimal::new(sign, BigUint::zero(), ideal);
    }
    let prec = ctx.precision() as u64;
    let shift = (prec + 2 + digit_count(cb)).saturating_sub(digit_count(ca));
    let (q, r) = (ca * pow10(shift)).div_rem(cb);
    let exp = ideal.saturating_sub(shift as i64);
    if r.is_zero() {
        let (q, exp) = strip_zeros(q, exp, ideal);
        finish(sign, q, exp, false, ctx)
    } else {
        finish(sign, q, exp, true, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ctx(prec: usize, rounding: Rounding) -> Context {
        Context::with_rounding(prec, rounding).unwrap()
    }

    #[test]
    fn ties_follow_rounding_mode() {
        let cases = [
            ("2.5", Rounding::HalfEven, "2"),
            ("3.5", Rounding::HalfEven, "4"),
            ("2.5", Rounding::HalfUp, "3"),
            ("2.5", Rounding::HalfDown, "2"),
            ("-2.5", Rounding::HalfUp, "-3"),
            ("2.1", Rounding::AwayFromZero, "3"),
            ("2.9", Rounding::ToZero, "2"),
            ("-2.1", Rounding::Ceiling, "-2"),
            ("-2.1", Rounding::Floor, "-3"),
            ("2.1", Rounding::Ceiling, "3"),
        ];
        for (x, mode, want) in cases {
            let got = d(x).round(&ctx(1, mode));
            assert_eq!(got, d(want), "round({x}, {mode:?}) = {got}");
        }
    }

    #[test]
    fn carry_out_of_nines_bumps_exponent() {
        let got = d("9.996").round(&ctx(3, Rounding::HalfEven));
        assert_eq!(got.to_string(), "10.0");
    }

    #[test]
    fn add_across_huge_exponent_gap_is_bounded_and_sticky() {
        let c = ctx(5, Rounding::HalfEven);
        let big = d("1E+1000000");
        let tiny = d("1E-1000000");
        assert_eq!(big.add(&tiny, &c), big);
        // The sticky unit breaks the tie upward.
        let tie = d("1.00005");
        assert_eq!(tie.round(&c), d("1.0000"));
        assert_eq!(tie.add(&tiny, &c), d("1.0001"));
        let up = ctx(5, Rounding::Ceiling);
        assert_eq!(d("1").add(&tiny, &up), d("1.0001"));
        let down = ctx(5, Rounding::Floor);
        assert_eq!(d("1").sub(&tiny, &down), d("0.99999"));
    }

    #[test]
    fn signed_zero_sums() {
        let c = Context::default();
        assert!(d("-0").add(&d("-0"), &c).is_sign_negative());
        assert!(d("-0").add(&d("0"), &c).is_sign_positive());
        assert!(d("1").sub(&d("1"), &c).is_sign_positive());
        let floor = ctx(10, Rounding::Floor);
        assert!(d("1").sub(&d("1"), &floor).is_sign_negative());
    }

    #[test]
    fn division_rounds_and_strips_exact_quotients() {
        let c = ctx(10, Rounding::HalfEven);
        assert_eq!(d("1").div(&d("3"), &c).to_string(), "0.3333333333");
        assert_eq!(d("2").div(&d("3"), &c).to_string(), "0.6666666667");
        assert_eq!(d("1").div(&d("4"), &c).to_string(), "0.25");
        assert_eq!(d("1").div(&d("0"), &c), Decimal::infinity(Sign::Pos));
        assert_eq!(d("-1").div(&d("0"), &c), Decimal::infinity(Sign::Neg));
        assert!(d("0").div(&d("0"), &c).is_nan());
    }

    #[test]
    fn sqrt_of_two_and_exact_squares() {
        let c = ctx(20, Rounding::HalfEven);
        assert_eq!(d("2").sqrt(&c).to_string(), "1.4142135623730950488");
        assert_eq!(d("0.0144").sqrt(&c).to_string(), "0.12");
        assert!(d("-0").sqrt(&c).is_sign_negative());
        assert!(d("-4").sqrt(&c).is_nan());
    }

    #[test]
    fn exponent_range_overflows_and_underflows() {
        use super::super::{MAX_EXPONENT, MIN_EXPONENT};

        let c = ctx(10, Rounding::HalfEven);
        let top = Decimal::new(Sign::Pos, 1u32.into(), MAX_EXPONENT);
        let bottom = Decimal::new(Sign::Pos, 1u32.into(), MIN_EXPONENT);

        assert_eq!(top.mul(&top, &c), Decimal::infinity(Sign::Pos));
        assert_eq!(top.mul(&-&top, &c), Decimal::infinity(Sign::Neg));
        assert_eq!(top.div(&bottom, &c), Decimal::infinity(Sign::Pos));

        let tiny = bottom.mul(&bottom, &c);
        assert!(tiny.is_zero() && tiny.is_sign_positive());
        let tiny = (-&bottom).div(&top, &c);
        assert!(tiny.is_zero() && tiny.is_sign_negative());
        assert_eq!(bottom.mul(&bottom, &ctx(10, Rounding::Ceiling)), bottom);

        // Half of the smallest unit is a tie at the exponent floor.
        let half = bottom.div(&d("2"), &c);
        assert!(half.is_zero());
        assert_eq!(bottom.div(&d("2"), &ctx(10, Rounding::HalfUp)), bottom);

        assert_eq!(
            Decimal::new(Sign::Neg, 7u32.into(), i64::MAX),
            Decimal::infinity(Sign::Neg)
        );
        assert!(Decimal::new(Sign::Pos, 0u32.into(), i64::MAX).is_zero());
        assert!(Decimal::new(Sign::Pos, 123u32.into(), i64::MIN).is_zero());
        assert_eq!(
            Decimal::new(Sign::Pos, 123u32.into(), MIN_EXPONENT - 2),
            bottom
        );
    }

    #[test]
    fn specials_follow_ieee_rules() {
        let c = Context::default();
        let inf = Decimal::infinity(Sign::Pos);
        let ninf = Decimal::infinity(Sign::Neg);
        assert!(inf.add(&ninf, &c).is_nan());
        assert!(inf.mul(&d("0"), &c).is_nan());
        assert_eq!(inf.mul(&d("-2"), &c), ninf);
        assert!(d("3").div(&ninf, &c).is_sign_negative());
        assert!(inf.div(&inf, &c).is_nan());
    }
}

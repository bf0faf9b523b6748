//! Taylor kernel: atan(x) = x - x^3/3 + x^5/5 - ... for 0 <= x < 1/2.
//!
//! Every product, quotient and partial sum is rounded to the working
//! precision. The loop stops once a term drops below one unit in the
//! `wp`-th digit of the running sum, and it can never run past
//! `term_bound`, which follows from |term_j / sum| <= (x^2)^j / 0.9.

use core::cmp::Ordering;

use log::trace;
use num_bigint::BigUint;

use crate::maths::decimal::{Context, Decimal, Sign};

/// Tenths of a digit each term gains when only x^2 < 1/4 is known
/// (log10(4) > 0.6).
const QUARTER_TENTHS: u64 = 6;

/// Most terms the series can need for `x2 = x^2` at `wp` digits.
pub(crate) fn term_bound(x2: &Decimal, wp: usize) -> u64 {
    let tenths = match x2.adjusted() {
        Some(e) if e <= -2 => (e.unsigned_abs() - 1).saturating_mul(10),
        _ => QUARTER_TENTHS,
    };
    ((wp as u64 + 2) * 10).div_ceil(tenths) + 1
}

/// atan(x) to `wp` significant digits; `x` must be non-negative and below 1/2.
pub(crate) fn atan_series(x: &Decimal, wp: usize) -> Decimal {
    debug_assert!(
        !x.is_sign_negative() && x.cmp_abs(&half()) == Some(Ordering::Less),
        "series argument out of range: {x}"
    );
    let ctx = Context::working(wp);
    let mut sum = x.round(&ctx);
    if x.is_zero() {
        return sum;
    }

    let x2 = x.mul(x, &ctx);
    let bound = term_bound(&x2, wp);
    let mut power = sum.clone();
    let mut terms = 0;
    for j in 1..=bound {
        power = power.mul(&x2, &ctx);
        let term = power.div(&Decimal::from(2 * j + 1), &ctx);
        if negligible(&term, &sum, wp) {
            break;
        }
        sum = if j % 2 == 1 {
            sum.sub(&term, &ctx)
        } else {
            sum.add(&term, &ctx)
        };
        terms = j;
    }
    trace!("atan series: {terms} terms of at most {bound} at wp={wp}");
    sum
}

#[inline]
fn half() -> Decimal {
    Decimal::new(Sign::Pos, BigUint::from(5u32), -1)
}

/// `term` sits below the last kept digit of `sum`.
#[inline]
fn negligible(term: &Decimal, sum: &Decimal, wp: usize) -> bool {
    match (term.adjusted(), sum.adjusted()) {
        (Some(t), Some(s)) => term.is_zero() || t < s - wp as i64,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn bound_tracks_argument_size() {
        let wp = 100;
        // x^2 in [0.1, 0.25): a fifth of a digit per term at worst.
        assert_eq!(term_bound(&d("0.2"), wp), 171);
        // x^2 ~ 1E-10: nine digits per term.
        assert_eq!(term_bound(&d("1E-10"), wp), 13);
        assert_eq!(term_bound(&d("1E-100000"), wp), 2);
    }

    #[test]
    fn matches_known_values() {
        // atan(0.1) = 0.0996686524911620273784461198780...
        let got = atan_series(&d("0.1"), 30);
        let want = d("0.0996686524911620273784461198780");
        let ctx = Context::working(25);
        assert_eq!(got.round(&ctx), want.round(&ctx));

        let tiny = d("1E-40");
        assert_eq!(atan_series(&tiny, 30), tiny);
        assert!(atan_series(&d("0"), 30).is_zero());
    }

    #[test]
    fn terminates_well_inside_the_bound() {
        let x = d("0.4142135623730950488016887242096980785696");
        let wp = 200;
        let x2 = x.mul(&x, &Context::working(wp));
        assert!(term_bound(&x2, wp) < 400);
        let v = atan_series(&x, wp);
        // atan(sqrt(2) - 1) = pi/8 to the 40 digits of the argument.
        let pi_8 = d("0.3926990816987241548078304229099378605246");
        let diff = v.sub(&pi_8, &Context::working(wp)).abs();
        assert!(diff < d("1E-39"), "diff {diff}");
    }
}

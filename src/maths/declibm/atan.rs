//! atan(x) implementation.
//!
//! Special values are answered from the dispatch table below. A finite x is
//! reduced (sign split off, |x| > 1 inverted, half-angle steps), handed to
//! the Taylor kernel at working precision, then recomposed and rounded once
//! to the caller's context. An x so small that x^3/3 falls below the last
//! working digit skips all of that and rounds x less a sticky unit.

use super::consts::{ConstCache, PiMultiple};
use super::reduce::{Reduction, reduce};
use super::series::atan_series;
use crate::maths::decimal::{Class, Context, Decimal, Sign, digit_count, finish, pow10};

pub fn atan(x: &Decimal, ctx: &Context) -> Decimal {
    match x.class() {
        Class::NaN => Decimal::nan(),
        Class::Zero(sign) => Decimal::zero(sign),
        Class::Infinite(sign) => ConstCache::global().get(PiMultiple::Half, sign, ctx),
        Class::Finite(_) => atan_finite(x, ctx),
    }
}

/// atan of a finite, nonzero `x`, rounded to `ctx`.
fn atan_finite(x: &Decimal, ctx: &Context) -> Decimal {
    if let Some(v) = tiny_atan(x, ctx) {
        return v;
    }
    let sign = if x.is_sign_negative() {
        Sign::Neg
    } else {
        Sign::Pos
    };
    let reduced = match reduce(&x.abs(), ctx.precision()) {
        Reduction::Quarter => {
            return ConstCache::global().get(PiMultiple::Quarter, sign, ctx);
        }
        Reduction::Series(r) => r,
    };

    let wctx = Context::working(reduced.working_precision);
    let mut v = atan_series(&reduced.x, reduced.working_precision).mul_pow2(reduced.halvings, &wctx);
    if reduced.complement {
        let half_pi = ConstCache::global().get(PiMultiple::Half, Sign::Pos, &wctx);
        v = half_pi.sub(&v, &wctx);
    }
    v.with_sign(sign).round(ctx)
}

/// atan(x) for |x| < 10^-(d/2 + 2), where `d` is the larger of the operand
/// length and `precision + 3`. There atan(x) = x - x^3/3 + ... sits strictly
/// between x and the value one unit below it in the `d`-th digit, so x less
/// a sticky unit rounds like the true result in every mode.
fn tiny_atan(x: &Decimal, ctx: &Context) -> Option<Decimal> {
    let Decimal::Finite { sign, coeff, exp } = x else {
        return None;
    };
    let len = digit_count(coeff);
    let d = len.max(ctx.precision() as u64 + 3);
    if x.adjusted()? >= -((d / 2) as i64) - 2 {
        return None;
    }
    let shift = d - len;
    let below = coeff * pow10(shift) - 1u32;
    Some(finish(*sign, below, exp.saturating_sub(shift as i64), true, ctx))
}

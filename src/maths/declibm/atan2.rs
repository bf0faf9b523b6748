//! atan2(y,x) implementation.
//!
//! Resolves NaN, signed zeros and infinities from an exhaustive table over
//! the operand classes, then reduces to atan(y/x), shifted by pi when x is
//! negative. The quotient and the pi shift are carried at working precision
//! and rounded once at the end.

use super::atan::atan;
use super::consts::{ConstCache, PiMultiple};
use crate::maths::decimal::{Class, Context, Decimal, Sign, len10};

/// Digits carried past the destination precision for y/x and the pi shift.
#[inline]
fn quotient_guard(precision: usize) -> usize {
    4 + len10(precision)
}

pub fn atan2(y: &Decimal, x: &Decimal, ctx: &Context) -> Decimal {
    let consts = ConstCache::global();
    match (y.class(), x.class()) {
        (Class::NaN, _) | (_, Class::NaN) => Decimal::nan(),

        (Class::Zero(sy), Class::Zero(Sign::Pos) | Class::Finite(Sign::Pos) | Class::Infinite(Sign::Pos)) => {
            Decimal::zero(sy)
        }
        (Class::Zero(sy), Class::Zero(Sign::Neg) | Class::Finite(Sign::Neg) | Class::Infinite(Sign::Neg)) => {
            consts.get(PiMultiple::Pi, sy, ctx)
        }

        (Class::Finite(sy) | Class::Infinite(sy), Class::Zero(_)) => {
            consts.get(PiMultiple::Half, sy, ctx)
        }

        (Class::Infinite(sy), Class::Infinite(Sign::Pos)) => consts.get(PiMultiple::Quarter, sy, ctx),
        (Class::Infinite(sy), Class::Infinite(Sign::Neg)) => {
            consts.get(PiMultiple::ThreeQuarters, sy, ctx)
        }

        (Class::Finite(sy), Class::Infinite(Sign::Pos)) => Decimal::zero(sy),
        (Class::Finite(sy), Class::Infinite(Sign::Neg)) => consts.get(PiMultiple::Pi, sy, ctx),

        (Class::Infinite(sy), Class::Finite(_)) => consts.get(PiMultiple::Half, sy, ctx),

        // y/x can overflow to an infinity or underflow to a signed zero at
        // the ends of the exponent range; atan's own table resolves both.
        (Class::Finite(_), Class::Finite(Sign::Pos)) => {
            let wctx = Context::working(ctx.precision() + quotient_guard(ctx.precision()));
            atan(&y.div(x, &wctx), ctx)
        }
        (Class::Finite(sy), Class::Finite(Sign::Neg)) => {
            let wctx = Context::working(ctx.precision() + quotient_guard(ctx.precision()));
            let a = atan(&y.div(x, &wctx), &wctx);
            // y > 0: a + pi; y < 0: a - pi.
            a.add(&consts.get(PiMultiple::Pi, sy, &wctx), &wctx).round(ctx)
        }
    }
}

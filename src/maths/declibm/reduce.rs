//! Argument reduction for atan.
//!
//! |x| > 1 is folded through atan(x) = pi/2 - atan(1/x) and |x| = 1 is
//! answered as pi/4 directly. The remaining magnitude is then pushed toward
//! zero with the half-angle identity
//!
//!   atan(x) = 2 * atan(x / (1 + sqrt(1 + x^2)))
//!
//! which at least halves the argument per step. The step count trades a
//! sqrt and a division per halving against series terms saved: the target
//! magnitude 10^-t grows with sqrt(precision).

use core::cmp::Ordering;

use log::trace;

use crate::maths::decimal::{Context, Decimal, len10};

/// Decimal digits gained per halving, in tenths (log10(2) > 0.3).
const HALVING_TENTHS: u64 = 3;

/// How a reduced result is turned back into atan of the original magnitude.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reduced {
    /// Non-negative argument handed to the series, below 1/2.
    pub x: Decimal,
    /// Number of half-angle steps; the series result is doubled this often.
    pub halvings: u32,
    /// The magnitude was inverted; recompose as pi/2 - result.
    pub complement: bool,
    pub working_precision: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reduction {
    /// |x| = 1: atan is pi/4 exactly.
    Quarter,
    Series(Reduced),
}

/// Magnitude, in digits, the half-angle steps aim for.
#[inline]
fn target_digits(precision: usize) -> i64 {
    (precision.isqrt() / 6).max(1) as i64
}

#[inline]
pub(crate) fn guard_digits(precision: usize, halvings: u32) -> usize {
    8 + 2 * len10(precision) + (halvings as u64 * HALVING_TENTHS).div_ceil(10) as usize
}

/// Reduces the finite, non-NaN magnitude `ax` for a result of `precision`
/// digits.
pub(crate) fn reduce(ax: &Decimal, precision: usize) -> Reduction {
    let one = Decimal::one();
    // Lower bound on log10(1/y) for the value y entering the halvings.
    let adjusted = ax.adjusted().unwrap_or(0);
    let (complement, lower) = match ax.cmp_abs(&one) {
        Some(Ordering::Equal) => return Reduction::Quarter,
        Some(Ordering::Greater) => (true, adjusted),
        _ => (false, adjusted.saturating_neg().saturating_sub(1)),
    };

    let target = target_digits(precision);
    let halvings = if lower >= target {
        0
    } else {
        (((target - lower) * 10) as u64).div_ceil(HALVING_TENTHS) as u32
    };
    let working_precision = precision + guard_digits(precision, halvings);
    let ctx = Context::working(working_precision);

    let mut x = if complement {
        one.div(ax, &ctx)
    } else {
        ax.round(&ctx)
    };
    for _ in 0..halvings {
        x = halve(&x, &ctx);
    }
    trace!(
        "atan reduction: complement={complement} halvings={halvings} wp={working_precision} x'~1E{}",
        x.adjusted().unwrap_or(0)
    );

    Reduction::Series(Reduced {
        x,
        halvings,
        complement,
        working_precision,
    })
}

/// x / (1 + sqrt(1 + x^2)), the argument whose atan is half of atan(x).
fn halve(x: &Decimal, ctx: &Context) -> Decimal {
    let one = Decimal::one();
    let root = one.add(&x.mul(x, ctx), ctx).sqrt(ctx);
    x.div(&one.add(&root, ctx), ctx)
}

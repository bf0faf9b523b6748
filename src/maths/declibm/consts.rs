//! Process-wide cache of pi and its fixed multiples.
//!
//! Pi is computed once per precision tier with Machin's formula,
//! pi/4 = 4*arctan(1/5) - arctan(1/239), in fixed-point integer arithmetic.
//! The multiples pi/2, pi/4 and 3pi/4 are exact rescalings of the cached
//! coefficient, so they are never iterated on their own. A tier is only
//! ever replaced by a more precise one.

use std::sync::Arc;

use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;
use parking_lot::RwLock;

use crate::maths::decimal::{Context, Decimal, Sign, len10, pow10};

/// Digits held beyond any precision served from a tier.
const PI_GUARD: usize = 10;

/// Fixed multiples of pi, as `factor * 10^shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiMultiple {
    Pi,
    Half,
    Quarter,
    ThreeQuarters,
}

impl PiMultiple {
    #[inline]
    fn scale(self) -> (u32, i64) {
        match self {
            PiMultiple::Pi => (1, 0),
            PiMultiple::Half => (5, -1),
            PiMultiple::Quarter => (25, -2),
            PiMultiple::ThreeQuarters => (75, -2),
        }
    }
}

#[derive(Debug)]
struct Tier {
    /// Positive, rounded to `precision` digits.
    coeff: BigUint,
    exp: i64,
    precision: usize,
}

#[derive(Debug, Default)]
pub struct ConstCache {
    tier: RwLock<Option<Arc<Tier>>>,
}

static GLOBAL: ConstCache = ConstCache::new();

impl ConstCache {
    pub const fn new() -> ConstCache {
        ConstCache {
            tier: parking_lot::const_rwlock(None),
        }
    }

    /// The cache shared by every `atan`/`atan2` call in the process.
    #[inline]
    pub fn global() -> &'static ConstCache {
        &GLOBAL
    }

    /// Digits held by the current tier; 0 before first use.
    pub fn cached_precision(&self) -> usize {
        self.tier.read().as_ref().map_or(0, |t| t.precision)
    }

    /// `multiple` with sign `sign`, rounded to `ctx`.
    pub fn get(&self, multiple: PiMultiple, sign: Sign, ctx: &Context) -> Decimal {
        let tier = self.tier_for(ctx.precision());
        let (factor, shift) = multiple.scale();
        Decimal::new(sign, &tier.coeff * factor, tier.exp + shift).round(ctx)
    }

    fn tier_for(&self, precision: usize) -> Arc<Tier> {
        let needed = precision + PI_GUARD;
        let current = self.tier.read().clone();
        let grown = match current {
            Some(tier) if tier.precision >= needed => return tier,
            Some(tier) => needed.max(tier.precision + tier.precision / 2),
            None => needed,
        };

        // Computed outside the lock; racing callers may both compute, only
        // the more precise result is kept.
        debug!("pi cache miss: computing {grown} digits for a {precision}-digit request");
        let fresh = Arc::new(machin_pi(grown));
        let mut slot = self.tier.write();
        match slot.as_ref() {
            Some(tier) if tier.precision >= fresh.precision => Arc::clone(tier),
            _ => {
                *slot = Some(Arc::clone(&fresh));
                fresh
            }
        }
    }
}

/// Pi rounded to `ctx`, served from the process-wide cache.
pub fn pi(ctx: &Context) -> Decimal {
    ConstCache::global().get(PiMultiple::Pi, Sign::Pos, ctx)
}

fn machin_pi(digits: usize) -> Tier {
    let frac = digits + 5 + len10(digits);
    let one = pow10(frac as u64);
    let pi = arccot(5, &one) * 16u32 - arccot(239, &one) * 4u32;
    let rounded = Decimal::new(Sign::Pos, pi, -(frac as i64)).round(&Context::working(digits));
    match rounded {
        Decimal::Finite { coeff, exp, .. } => Tier {
            coeff,
            exp,
            precision: digits,
        },
        // Rounding a finite value stays finite.
        _ => unreachable!("pi rounded to a special value"),
    }
}

/// `arctan(1/k) * one`, truncated per term.
fn arccot(k: u32, one: &BigUint) -> BigUint {
    let k2 = k * k;
    let mut power = one / k;
    let mut pos = BigUint::zero();
    let mut neg = BigUint::zero();
    let mut n: u64 = 1;
    let mut add = true;
    while !power.is_zero() {
        let term = &power / n;
        if add {
            pos += term;
        } else {
            neg += term;
        }
        power /= k2;
        n += 2;
        add = !add;
    }
    pos - neg
}

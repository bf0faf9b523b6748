use core::fmt;

use super::{Context, ContextError, Decimal, Sign};

/// A destination slot: a value together with the context every result
/// written into it is rounded to.
#[derive(Debug, Clone, PartialEq)]
pub struct Big {
    ctx: Context,
    value: Decimal,
}

impl Big {
    /// A `+0` slot delivering `precision` significant digits.
    pub fn with_precision(precision: usize) -> Result<Big, ContextError> {
        Ok(Big::with_context(Context::new(precision)?))
    }

    pub fn with_context(ctx: Context) -> Big {
        Big {
            ctx,
            value: Decimal::zero(Sign::Pos),
        }
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    #[inline]
    pub fn precision(&self) -> usize {
        self.ctx.precision()
    }

    #[inline]
    pub fn value(&self) -> &Decimal {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> Decimal {
        self.value
    }

    /// Stores `x` rounded to the slot's context.
    pub fn set(&mut self, x: &Decimal) -> &mut Big {
        self.value = x.round(&self.ctx);
        self
    }

    /// Takes the current value out, leaving `+0` behind.
    pub(crate) fn take_value(&mut self) -> Decimal {
        core::mem::replace(&mut self.value, Decimal::zero(Sign::Pos))
    }

    pub(crate) fn store(&mut self, value: Decimal) -> &mut Big {
        self.value = value;
        self
    }
}

impl fmt::Display for Big {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

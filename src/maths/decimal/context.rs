use thiserror::Error;

/// How a result is rounded to its context's precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Nearest, ties to the even digit.
    #[default]
    HalfEven,
    /// Nearest, ties away from zero.
    HalfUp,
    /// Nearest, ties toward zero.
    HalfDown,
    ToZero,
    AwayFromZero,
    /// Toward +Infinity.
    Ceiling,
    /// Toward -Infinity.
    Floor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("invalid precision {0}: a context needs at least one significant digit")]
    InvalidPrecision(usize),
}

/// Significant-digit count and rounding mode a result is delivered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context {
    precision: usize,
    rounding: Rounding,
}

/// decimal128 digits.
const DEFAULT_PRECISION: usize = 34;

impl Context {
    pub fn new(precision: usize) -> Result<Context, ContextError> {
        Context::with_rounding(precision, Rounding::HalfEven)
    }

    pub fn with_rounding(precision: usize, rounding: Rounding) -> Result<Context, ContextError> {
        if precision == 0 {
            return Err(ContextError::InvalidPrecision(precision));
        }
        Ok(Context {
            precision,
            rounding,
        })
    }

    /// Internal context for intermediate steps: round-half-even at
    /// `precision.max(1)` digits.
    #[inline]
    pub(crate) fn working(precision: usize) -> Context {
        Context {
            precision: precision.max(1),
            rounding: Rounding::HalfEven,
        }
    }

    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::working(DEFAULT_PRECISION)
    }
}

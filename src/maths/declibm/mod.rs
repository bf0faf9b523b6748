//! Inverse tangent over arbitrary-precision decimals.
//!
//! `atan` and `atan2` are pure functions of their operands and a context;
//! the only shared state is the growth-only pi cache in `consts`. `Big`
//! gets slot-writing forms of both that round to the slot's own context.

mod atan;
mod atan2;
mod consts;
mod reduce;
mod series;

pub use atan::atan;
pub use atan2::atan2;
pub use consts::{ConstCache, PiMultiple, pi};

use crate::maths::decimal::{Big, Decimal};

impl Big {
    /// Writes atan(x) rounded to this slot's context.
    pub fn set_atan(&mut self, x: &Decimal) -> &mut Big {
        let v = atan(x, self.context());
        self.store(v)
    }

    /// Writes atan2(y, x) rounded to this slot's context.
    pub fn set_atan2(&mut self, y: &Decimal, x: &Decimal) -> &mut Big {
        let v = atan2(y, x, self.context());
        self.store(v)
    }

    /// Replaces the held value v with atan(v).
    pub fn atan_mut(&mut self) -> &mut Big {
        let x = self.take_value();
        let v = atan(&x, self.context());
        self.store(v)
    }

    /// Replaces the held value y with atan2(y, x).
    pub fn atan2_mut(&mut self, x: &Decimal) -> &mut Big {
        let y = self.take_value();
        let v = atan2(&y, x, self.context());
        self.store(v)
    }

    /// Writes pi rounded to this slot's context.
    pub fn set_pi(&mut self) -> &mut Big {
        let v = pi(self.context());
        self.store(v)
    }
}

//! Decimal value type and the inverse-tangent routines built on it.
//!
//! `decimal` carries the arbitrary-precision representation and its
//! once-rounded elementary operations; `declibm` holds atan/atan2, the
//! argument reducer, the series kernel and the process-wide pi cache.

pub mod decimal;
pub mod declibm;

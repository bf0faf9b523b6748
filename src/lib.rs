//! Correctly rounded arbitrary-precision decimal `atan` and `atan2`.
//!
//! ```
//! use decmaths::{Big, Decimal};
//!
//! let x: Decimal = "100.0".parse().unwrap();
//! let mut z = Big::with_precision(30).unwrap();
//! z.set_atan(&x);
//! assert_eq!(z.to_string(), "1.56079666010823138102498157543");
//! ```

pub mod maths;

pub use maths::decimal::{
    Big, Class, Context, ContextError, Decimal, MAX_EXPONENT, MIN_EXPONENT, ParseDecimalError,
    Rounding, Sign,
};
pub use maths::declibm;

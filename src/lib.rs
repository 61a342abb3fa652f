//! Arbitrary-precision signed integers on 63-bit limbs.
//!
//! [`LargeInt`] is an immutable value type: every arithmetic operation
//! returns a new value rather than mutating its receiver, so instances are
//! `Send + Sync` and freely shared across the Karatsuba fan-out that splits
//! large multiplications into concurrent sub-products.

mod arith;
mod convert;
mod division;
mod error;
mod karatsuba;
mod limb;
mod modulus;
pub mod pool;
mod shift;
mod value;


pub use error::{LargeIntError, ParseFailure, Result};
pub use modulus::{ModulusScope, get_modulus, set_modulus};
pub use value::{LargeInt, ONE, ZERO};

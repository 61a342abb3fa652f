//! The scoped modulus: a dynamically-scoped variable consulted by `plus`,
//! `times`, `opposite`, and `reciprocal`. Implemented as a thread-local
//! stack of frames rather than a plain global, so a nested scope can
//! override (or explicitly unset) the modulus and have it restored when the
//! scope exits — lexical push/pop, not ambient mutable state.

use crate::error::{LargeIntError, Result};
use crate::value::LargeInt;
use std::cell::RefCell;

thread_local! {
    static MODULUS_STACK: RefCell<Vec<Option<LargeInt>>> = const { RefCell::new(Vec::new()) };
}

/// Restores the previous modulus frame when dropped. Returned by
/// [`set_modulus`]; hold it for the duration of the scope that needs the
/// override.
#[must_use = "the modulus reverts as soon as this guard is dropped"]
pub struct ModulusScope {
    _private: (),
}

impl Drop for ModulusScope {
    fn drop(&mut self) {
        MODULUS_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Pushes a new modulus frame, active until the returned [`ModulusScope`] is
/// dropped. `Some(m)` requires `m > 0`; `None` explicitly unsets the modulus
/// within this scope, even if an outer scope had one set.
pub fn set_modulus(modulus: Option<LargeInt>) -> Result<ModulusScope> {
    if let Some(m) = &modulus {
        if !m.is_positive() {
            return Err(LargeIntError::InvalidModulus { value: m.to_text(10) });
        }
    }
    MODULUS_STACK.with(|stack| stack.borrow_mut().push(modulus));
    Ok(ModulusScope { _private: () })
}

/// The modulus active in the current scope, if any.
pub fn get_modulus() -> Option<LargeInt> {
    MODULUS_STACK.with(|stack| stack.borrow().last().cloned().flatten())
}

impl LargeInt {
    /// `self + other`, reduced into `[0, m)` under the scoped modulus; plain
    /// addition when no modulus is active.
    pub fn plus(&self, other: &LargeInt) -> Result<LargeInt> {
        match get_modulus() {
            Some(m) => {
                let sum = self.modulo(&m)?.add(&other.modulo(&m)?);
                sum.modulo(&m)
            }
            None => Ok(self.add(other)),
        }
    }

    /// `self * other` modulo the scoped modulus; plain multiplication when
    /// unset.
    pub fn times(&self, other: &LargeInt) -> Result<LargeInt> {
        match get_modulus() {
            Some(m) => self.multiply_large(other).modulo(&m),
            None => Ok(self.multiply_large(other)),
        }
    }

    /// Additive inverse under the scoped modulus: `m - (self mod m)`. Falls
    /// back to ordinary negation when no modulus is active.
    pub fn opposite(&self) -> Result<LargeInt> {
        match get_modulus() {
            Some(m) => m.subtract(&self.modulo(&m)?).modulo(&m),
            None => Ok(self.negate()),
        }
    }

    /// Modular inverse under the scoped modulus via the extended Euclidean
    /// algorithm: maintains `(p, q, r, s)` with `p*self + q*m = a` and
    /// `r*self + s*m = b`, reducing `(a, b) <- (b, a mod b)` and the
    /// coefficients in lockstep until `b == 0`; `p mod m` is then the
    /// inverse. Defined only when `gcd(self, m) == 1`; otherwise the
    /// returned value is not a true inverse (the algorithm doesn't detect
    /// non-invertibility on its own, matching spec scope).
    pub fn reciprocal(&self) -> Result<LargeInt> {
        let m = get_modulus().ok_or(LargeIntError::UnsetModulus)?;
        let (mut old_r, mut r) = (self.modulo(&m)?, m.clone());
        let (mut old_s, mut s) = (LargeInt::from_i64(1), LargeInt::from_i64(0));
        while !r.is_zero() {
            let q = old_r.divide(&r)?;
            let rem = q.get_remainder().cloned().expect("divide always attaches a remainder");
            let new_r = rem;
            let new_s = old_s.subtract(&q.multiply_large(&s));
            old_r = r;
            r = new_r;
            old_s = s;
            s = new_s;
        }
        old_s.modulo(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_modulus_performs_ordinary_arithmetic() {
        let a = LargeInt::from_i64(7);
        let b = LargeInt::from_i64(5);
        assert_eq!(a.plus(&b).unwrap(), LargeInt::from_i64(12));
        assert_eq!(a.times(&b).unwrap(), LargeInt::from_i64(35));
    }

    #[test]
    fn reciprocal_without_modulus_errors() {
        assert_eq!(LargeInt::from_i64(2).reciprocal(), Err(LargeIntError::UnsetModulus));
    }

    #[test]
    fn set_modulus_rejects_non_positive() {
        assert!(set_modulus(Some(LargeInt::from_i64(0))).is_err());
        assert!(set_modulus(Some(LargeInt::from_i64(-5))).is_err());
    }

    #[test]
    fn end_to_end_scenario_reciprocal_mod_prime() {
        let m = LargeInt::from_i64(1_000_000_007);
        let _scope = set_modulus(Some(m.clone())).unwrap();
        let two = LargeInt::from_i64(2);
        let inv = two.reciprocal().unwrap();
        assert_eq!(two.times(&inv).unwrap(), LargeInt::from_i64(1));
    }

    #[test]
    fn nested_scope_restores_outer_modulus_on_drop() {
        let outer = LargeInt::from_i64(13);
        let _outer_scope = set_modulus(Some(outer.clone())).unwrap();
        assert_eq!(get_modulus().unwrap(), outer);
        {
            let inner = LargeInt::from_i64(97);
            let _inner_scope = set_modulus(Some(inner.clone())).unwrap();
            assert_eq!(get_modulus().unwrap(), inner);
        }
        assert_eq!(get_modulus().unwrap(), outer);
    }

    #[test]
    fn nested_unset_hides_outer_modulus() {
        let outer = LargeInt::from_i64(13);
        let _outer_scope = set_modulus(Some(outer)).unwrap();
        {
            let _inner_scope = set_modulus(None).unwrap();
            assert_eq!(get_modulus(), None);
            assert_eq!(LargeInt::from_i64(2).reciprocal(), Err(LargeIntError::UnsetModulus));
        }
        assert!(get_modulus().is_some());
    }

    #[test]
    fn plus_and_times_reduce_into_range() {
        let m = LargeInt::from_i64(7);
        let _scope = set_modulus(Some(m.clone())).unwrap();
        let a = LargeInt::from_i64(5);
        let b = LargeInt::from_i64(6);
        let sum = a.plus(&b).unwrap();
        let product = a.times(&b).unwrap();
        assert_eq!(sum, LargeInt::from_i64(4));
        assert_eq!(product, LargeInt::from_i64(2));
    }
}

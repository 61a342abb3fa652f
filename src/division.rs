//! Division, the Newton-iteration scaled reciprocal, modulo, and GCD.
//!
//! The scaled-reciprocal path is what lets division by an arbitrarily large
//! divisor avoid a per-limb long-division loop: compute an approximate
//! reciprocal of the divisor to the precision the quotient needs, multiply,
//! then correct the handful of off-by-one cases the approximation can
//! leave behind.

use crate::error::{LargeIntError, Result};
use crate::value::LargeInt;
use std::cmp::Ordering;
use std::ops::{Div, Rem};

impl LargeInt {
    /// Divide by a divisor known to fit a native `i32`. `i32::MIN` needs no
    /// special casing in Rust the way it would in a host language whose
    /// `abs` overflows on the minimum value — [`i32::unsigned_abs`] handles
    /// it directly.
    pub fn divide_i32(&self, d: i32) -> Result<(LargeInt, LargeInt)> {
        if d == 0 {
            return Err(LargeIntError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok((LargeInt::from_i64(0), LargeInt::from_i64(0)));
        }
        let d_mag = d.unsigned_abs();
        let mut q = vec![0u64; self.size];
        let rem = crate::limb::divide_small(&self.limbs[..self.size], self.size, d_mag, &mut q);
        let quotient = LargeInt::raw(self.negative ^ (d < 0), q);
        let remainder = if rem == 0 { LargeInt::from_i64(0) } else { LargeInt::raw(self.negative, vec![rem]) };
        Ok((quotient, remainder))
    }

    /// `floor(2^(p + bit_length(self)) / self)` with error at most 1,
    /// computed by Newton iteration when `p > 31` and directly otherwise.
    /// `self` must be a positive, non-zero magnitude with `bit_length(self)
    /// >= p`'s eventual base case — callers only ever invoke this on a
    /// divisor magnitude, never a dividend.
    pub(crate) fn inverse_scaled(&self, p: u32) -> LargeInt {
        debug_assert!(!self.is_zero() && !self.is_negative());
        let l = self.bit_length();
        if p <= 31 {
            debug_assert!(l >= p);
            let d = self.shift_right((l - p) as i64).to_u64_lossy();
            debug_assert!(d != 0);
            let numerator: u64 = 1u64 << (2 * p);
            return LargeInt::from_u64(numerator / d);
        }
        tracing::trace!(precision = p, divisor_bits = l, "newton iteration step");
        let p_prime = p / 2 + 1;
        let x_prime = self.inverse_scaled(p_prime);
        let left_shift = p - p_prime + 1;
        let right_shift = 2 * p_prime + l - p;
        let term1 = x_prime.shift_left(left_shift as i64);
        let term2 = x_prime
            .multiply_large(&x_prime)
            .multiply_large(self)
            .shift_right(right_shift as i64);
        term1.subtract(&term2)
    }

    /// Full signed division, returning the quotient with the remainder
    /// attached via [`LargeInt::get_remainder`].
    pub fn divide(&self, other: &LargeInt) -> Result<LargeInt> {
        if other.is_zero() {
            return Err(LargeIntError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(LargeInt::from_i64(0).with_remainder(LargeInt::from_i64(0)));
        }
        let a = self.abs();
        let b = other.abs();
        if a.bit_length() < b.bit_length() {
            return Ok(LargeInt::from_i64(0).with_remainder(self.clone()));
        }

        let p = a.bit_length() - b.bit_length() + 1;
        let r = b.inverse_scaled(p);
        let product = a.multiply_large(&r);
        let mut quotient = product.shift_right((a.bit_length() + 1) as i64);
        let mut remainder = a.subtract(&quotient.multiply_large(&b));

        // The reciprocal carries error <= 1, so the candidate quotient is
        // off by at most one step in either direction.
        while remainder.is_negative() {
            remainder = remainder.add(&b);
            quotient = quotient.subtract(&LargeInt::from_i64(1));
        }
        while !remainder.is_negative() && remainder.magnitude_cmp(&b) != Ordering::Less {
            remainder = remainder.subtract(&b);
            quotient = quotient.add(&LargeInt::from_i64(1));
        }

        quotient.negative = quotient.size != 0 && (self.negative ^ other.negative);
        remainder.negative = remainder.size != 0 && self.negative;
        Ok(quotient.with_remainder(remainder))
    }

    /// `self mod m` for a positive `m`, always in `[0, m)`.
    pub fn modulo(&self, m: &LargeInt) -> Result<LargeInt> {
        if !m.is_positive() {
            return Err(LargeIntError::InvalidModulus { value: m.to_text(10) });
        }
        if !self.is_negative() && self.magnitude_cmp(m) == Ordering::Less {
            return Ok(self.clone());
        }
        let quotient = self.divide(m)?;
        let mut remainder = quotient.get_remainder().cloned().expect("divide always attaches a remainder");
        if remainder.is_negative() {
            remainder = remainder.add(m);
        }
        Ok(remainder)
    }

    /// Euclidean GCD of the magnitudes: `gcd(a, b) = gcd(b, a mod b)` until
    /// `b == 0`, returning `a`. `gcd(a, 0) = |a|`.
    pub fn gcd(&self, other: &LargeInt) -> LargeInt {
        let mut a = self.abs();
        let mut b = other.abs();
        while !b.is_zero() {
            let q = a.divide(&b).expect("b is checked non-zero by the loop condition");
            let r = q.get_remainder().cloned().expect("divide always attaches a remainder");
            a = b;
            b = r;
        }
        a
    }
}

/// `self / other`, panicking on division by zero the way primitive integer
/// division does.
impl Div for &LargeInt {
    type Output = LargeInt;
    fn div(self, rhs: Self) -> LargeInt {
        self.divide(rhs).expect("division by zero")
    }
}

impl Div for LargeInt {
    type Output = LargeInt;
    fn div(self, rhs: Self) -> LargeInt {
        self.divide(&rhs).expect("division by zero")
    }
}

/// `self % other`: the remainder attached to [`LargeInt::divide`]'s
/// quotient, carrying the dividend's sign (not the always-nonnegative
/// [`LargeInt::modulo`]).
impl Rem for &LargeInt {
    type Output = LargeInt;
    fn rem(self, rhs: Self) -> LargeInt {
        self.divide(rhs).expect("division by zero").get_remainder().expect("divide always attaches a remainder").clone()
    }
}

impl Rem for LargeInt {
    type Output = LargeInt;
    fn rem(self, rhs: Self) -> LargeInt {
        (&self).divide(&rhs).expect("division by zero").get_remainder().expect("divide always attaches a remainder").clone()
    }
}

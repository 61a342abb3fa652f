//! Signed add/subtract/negate/multiply-by-word, and the operator trait
//! impls that let [`LargeInt`] be used with ordinary Rust arithmetic syntax —
//! every operator here forwards to the named method below it, it adds no
//! behavior of its own.

use crate::limb::{self, MASK_63};
use crate::value::LargeInt;
use std::ops::{Add, Mul, Neg, Sub};

impl LargeInt {
    /// Flips the sign, unless the value is zero (which has no sign to flip).
    pub fn negate(&self) -> LargeInt {
        if self.size == 0 {
            return self.clone();
        }
        LargeInt::raw(!self.negative, self.limbs[..self.size].to_vec())
    }

    pub fn abs(&self) -> LargeInt {
        if self.negative { self.negate() } else { self.clone() }
    }

    /// Signed addition. Same-sign operands add magnitudes and keep the
    /// common sign; opposite-sign operands subtract the smaller magnitude
    /// from the larger and take the sign of the larger-magnitude operand,
    /// collapsing to non-negative zero when the magnitudes cancel.
    pub fn add(&self, other: &LargeInt) -> LargeInt {
        if self.negative == other.negative {
            let mut z = vec![0u64; self.size.max(other.size) + 1];
            let size = if self.size >= other.size {
                limb::add(&self.limbs[..self.size], &other.limbs[..other.size], &mut z)
            } else {
                limb::add(&other.limbs[..other.size], &self.limbs[..self.size], &mut z)
            };
            z.truncate(size);
            return LargeInt::raw(self.negative, z);
        }
        match self.magnitude_cmp(other) {
            std::cmp::Ordering::Equal => LargeInt::from_i64(0),
            std::cmp::Ordering::Greater => {
                let mut z = vec![0u64; self.size];
                let size = limb::subtract(&self.limbs[..self.size], &other.limbs[..other.size], &mut z);
                z.truncate(size);
                LargeInt::raw(self.negative, z)
            }
            std::cmp::Ordering::Less => {
                let mut z = vec![0u64; other.size];
                let size = limb::subtract(&other.limbs[..other.size], &self.limbs[..self.size], &mut z);
                z.truncate(size);
                LargeInt::raw(other.negative, z)
            }
        }
    }

    /// `self - other`, implemented by mirroring `add`'s sign cases against a
    /// logically-negated `other` rather than materializing `-other` first.
    pub fn subtract(&self, other: &LargeInt) -> LargeInt {
        if self.negative != other.negative {
            let mut z = vec![0u64; self.size.max(other.size) + 1];
            let size = if self.size >= other.size {
                limb::add(&self.limbs[..self.size], &other.limbs[..other.size], &mut z)
            } else {
                limb::add(&other.limbs[..other.size], &self.limbs[..self.size], &mut z)
            };
            z.truncate(size);
            return LargeInt::raw(self.negative, z);
        }
        match self.magnitude_cmp(other) {
            std::cmp::Ordering::Equal => LargeInt::from_i64(0),
            std::cmp::Ordering::Greater => {
                let mut z = vec![0u64; self.size];
                let size = limb::subtract(&self.limbs[..self.size], &other.limbs[..other.size], &mut z);
                z.truncate(size);
                LargeInt::raw(self.negative, z)
            }
            std::cmp::Ordering::Less => {
                let mut z = vec![0u64; other.size];
                let size = limb::subtract(&other.limbs[..other.size], &self.limbs[..self.size], &mut z);
                z.truncate(size);
                LargeInt::raw(!other.negative, z)
            }
        }
    }

    pub fn compare_to(&self, other: &LargeInt) -> std::cmp::Ordering {
        self.cmp(other)
    }

    /// Multiply by a native signed machine word. `i64::MIN` is handled as
    /// `shift_left(63)` with a sign flip, since `|i64::MIN|` doesn't fit in
    /// a single 63-bit limb scalar.
    pub fn multiply_i64(&self, l: i64) -> LargeInt {
        if self.is_zero() || l == 0 {
            return LargeInt::from_i64(0);
        }
        if l == i64::MIN {
            return self.shift_left(63).negate();
        }
        let negative = self.negative ^ (l < 0);
        let k = l.unsigned_abs();
        self.multiply_u64(k, negative)
    }

    pub(crate) fn multiply_u64(&self, k: u64, negative: bool) -> LargeInt {
        if k == 0 || self.is_zero() {
            return LargeInt::from_i64(0);
        }
        if k <= MASK_63 {
            let mut z = vec![0u64; self.size + 1];
            limb::multiply_limb(&self.limbs[..self.size], self.size, k, &mut z, 0);
            return LargeInt::raw(negative, z);
        }
        // k needs two 63-bit limbs.
        let k_lo = k & MASK_63;
        let k_hi = k >> 63;
        let other = LargeInt::raw(false, vec![k_lo, k_hi]);
        self.multiply_large(&other).negate_if(negative != self.negative)
    }

    pub(crate) fn negate_if(&self, flip: bool) -> LargeInt {
        if flip { self.negate() } else { self.clone() }
    }
}

impl Add for &LargeInt {
    type Output = LargeInt;
    fn add(self, rhs: Self) -> LargeInt {
        LargeInt::add(self, rhs)
    }
}

impl Add for LargeInt {
    type Output = LargeInt;
    fn add(self, rhs: Self) -> LargeInt {
        LargeInt::add(&self, &rhs)
    }
}

impl Sub for &LargeInt {
    type Output = LargeInt;
    fn sub(self, rhs: Self) -> LargeInt {
        LargeInt::subtract(self, rhs)
    }
}

impl Sub for LargeInt {
    type Output = LargeInt;
    fn sub(self, rhs: Self) -> LargeInt {
        LargeInt::subtract(&self, &rhs)
    }
}

impl Neg for &LargeInt {
    type Output = LargeInt;
    fn neg(self) -> LargeInt {
        LargeInt::negate(self)
    }
}

impl Neg for LargeInt {
    type Output = LargeInt;
    fn neg(self) -> LargeInt {
        LargeInt::negate(&self)
    }
}

impl Mul for &LargeInt {
    type Output = LargeInt;
    fn mul(self, rhs: Self) -> LargeInt {
        self.multiply_large(rhs)
    }
}

impl Mul for LargeInt {
    type Output = LargeInt;
    fn mul(self, rhs: Self) -> LargeInt {
        self.multiply_large(&rhs)
    }
}

impl Mul<i64> for &LargeInt {
    type Output = LargeInt;
    fn mul(self, rhs: i64) -> LargeInt {
        self.multiply_i64(rhs)
    }
}

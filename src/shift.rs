//! Bit shifts with sign extension, and decimal-scale multiply/divide by a
//! power of ten.

use crate::limb::{self, LIMB_BITS};
use crate::value::LargeInt;

/// Powers of five that fit in a single 63-bit limb: `5^0 .. 5^26`.
pub const LONG_POW_5: [u64; 27] = {
    let mut table = [1u64; 27];
    let mut i = 1;
    while i < 27 {
        table[i] = table[i - 1] * 5;
        i += 1;
    }
    table
};

/// Powers of five that fit in 32 bits: `5^0 .. 5^12`.
pub const INT_POW_5: [u32; 13] = {
    let mut table = [1u32; 13];
    let mut i = 1;
    while i < 13 {
        table[i] = table[i - 1] * 5;
        i += 1;
    }
    table
};

impl LargeInt {
    /// Shift left by `n` bits. Negative `n` delegates to [`Self::shift_right`].
    pub fn shift_left(&self, n: i64) -> LargeInt {
        if n < 0 {
            return self.shift_right(-n);
        }
        if n == 0 || self.is_zero() {
            return self.clone();
        }
        let n = n as usize;
        let word_shift = n / LIMB_BITS as usize;
        let bit_shift = (n % LIMB_BITS as usize) as u32;
        let mut z = vec![0u64; self.size + word_shift + 1];
        let size = limb::shift_left(word_shift, bit_shift, &self.limbs[..self.size], self.size, &mut z);
        z.truncate(size);
        LargeInt::raw(self.negative, z)
    }

    /// Shift right by `n` bits, with arithmetic (floor) semantics on
    /// negative values: after shifting the magnitude, if any `1` bit was
    /// shifted out, the magnitude is incremented by one to restore the
    /// two's-complement floor-division behavior.
    pub fn shift_right(&self, n: i64) -> LargeInt {
        if n < 0 {
            return self.shift_left(-n);
        }
        if n == 0 || self.is_zero() {
            return self.clone();
        }
        let n = n as usize;
        let word_shift = n / LIMB_BITS as usize;
        let bit_shift = (n % LIMB_BITS as usize) as u32;

        if word_shift >= self.size {
            return if self.negative { LargeInt::from_i64(-1) } else { LargeInt::from_i64(0) };
        }

        let mut z = vec![0u64; self.size];
        let size = limb::shift_right(word_shift, bit_shift, &self.limbs[..self.size], self.size, &mut z);
        z.truncate(size);
        let mut result = LargeInt::raw(self.negative, z);

        if self.negative && self.any_bit_shifted_out(word_shift, bit_shift) {
            result = result.add(&LargeInt::from_i64(1));
        }
        result
    }

    fn any_bit_shifted_out(&self, word_shift: usize, bit_shift: u32) -> bool {
        if self.limbs[..word_shift].iter().any(|&w| w != 0) {
            return true;
        }
        if bit_shift == 0 {
            return false;
        }
        word_shift < self.size && (self.limbs[word_shift] & ((1u64 << bit_shift) - 1)) != 0
    }

    /// Multiply or divide by `10^n`. Implemented as `self * 5^n << n` for
    /// `n > 0` and `self / 5^n >> n` for `n < 0`, which is algebraically
    /// `10^n = 5^n * 2^n` (respectively its reciprocal) using the
    /// precomputed power-of-five tables rather than repeated decimal
    /// multiplication. `E(0)` is the identity.
    pub fn scale_by_power_of_ten(&self, n: i32) -> LargeInt {
        if n == 0 || self.is_zero() {
            return self.clone();
        }
        if n > 0 {
            let scaled = self.multiply_by_power_of_five(n as u32);
            scaled.shift_left(n as i64)
        } else {
            let divided = self.divide_by_power_of_five((-n) as u32);
            divided.shift_right((-n) as i64)
        }
    }

    fn multiply_by_power_of_five(&self, mut n: u32) -> LargeInt {
        let mut acc = self.clone();
        while n >= 26 {
            let sign = acc.is_negative();
            acc = acc.multiply_u64(LONG_POW_5[26], sign);
            n -= 26;
        }
        if n > 0 {
            let sign = acc.is_negative();
            acc = acc.multiply_u64(LONG_POW_5[n as usize], sign);
        }
        acc
    }

    fn divide_by_power_of_five(&self, mut n: u32) -> LargeInt {
        let mut acc = self.clone();
        while n >= 12 {
            acc = acc.divide_i32(INT_POW_5[12] as i32).expect("5^12 is a nonzero constant divisor").0;
            n -= 12;
        }
        if n > 0 {
            acc = acc
                .divide_i32(INT_POW_5[n as usize] as i32)
                .expect("nonzero constant divisor")
                .0;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_left_then_right_identity_on_non_truncated_bits() {
        let v = LargeInt::from_i64(123_456_789);
        let shifted = v.shift_left(17).shift_right(17);
        assert_eq!(shifted, v);
    }

    #[test]
    fn shift_right_on_negative_is_arithmetic_floor() {
        // -7 >> 1 == -4 (floor), not -3 (truncation toward zero).
        let v = LargeInt::from_i64(-7);
        assert_eq!(v.shift_right(1), LargeInt::from_i64(-4));
    }

    #[test]
    fn shift_left_two_to_one_hundred() {
        let v = LargeInt::from_i64(2).shift_left(100);
        assert_eq!(v.to_text(10), "1267650600228229401496703205376");
    }

    #[test]
    fn e_of_zero_is_identity() {
        let v = LargeInt::from_i64(-98765);
        assert_eq!(v.scale_by_power_of_ten(0), v);
    }

    #[test]
    fn e_round_trip_when_no_digits_lost() {
        let v = LargeInt::from_i64(42);
        let scaled = v.scale_by_power_of_ten(5).scale_by_power_of_ten(-5);
        assert_eq!(scaled, v);
    }

    #[test]
    fn e_preserves_sign_of_a_negative_value() {
        let v = LargeInt::from_i64(-7);
        let scaled = v.scale_by_power_of_ten(3);
        assert_eq!(scaled, LargeInt::from_i64(-7000));
    }

    #[test]
    fn e_preserves_sign_across_the_30_digit_limb_chunking() {
        // n = 40 spans two iterations of the 26-digit LONG_POW_5 chunk, so a
        // sign dropped mid-loop would surface here but not in a single-chunk
        // case.
        let v = LargeInt::from_i64(-3);
        let scaled = v.scale_by_power_of_ten(40);
        assert!(scaled.is_negative());
        assert_eq!(scaled.negate().scale_by_power_of_ten(-40), LargeInt::from_i64(3));
    }

    #[test]
    fn e_negative_divides_before_shifting_on_inexact_quotients() {
        // -7 / 10 = -7 / 5^1 >> 1: dividing first gives -1 (truncating
        // toward zero), then an arithmetic-floor shift right by one bit
        // leaves -1 unchanged. Shifting before dividing would instead
        // compute floor(-7 >> 1) = -4, then -4 / 5 truncated = 0, which is
        // wrong.
        let v = LargeInt::from_i64(-7);
        assert_eq!(v.scale_by_power_of_ten(-1), LargeInt::from_i64(-1));
    }
}

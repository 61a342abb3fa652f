//! Full multiplication between two arbitrary-precision magnitudes: schoolbook
//! below the tuning threshold, recursive Karatsuba above it with the three
//! sub-products dispatched to [`crate::pool`]'s work pool.

use crate::limb;
use crate::value::LargeInt;

/// Below this many limbs in the smaller operand, schoolbook `O(n^2)`
/// multiplication beats Karatsuba's recursion and fan-out overhead. Tunable;
/// order of magnitude matters more than the exact value.
pub const KARATSUBA_THRESHOLD: usize = 30;

impl LargeInt {
    /// `self * other`, magnitude via schoolbook or Karatsuba depending on
    /// size, sign by XOR of the operand signs.
    pub fn multiply_large(&self, other: &LargeInt) -> LargeInt {
        if self.is_zero() || other.is_zero() {
            return LargeInt::from_i64(0);
        }
        let negative = self.negative ^ other.negative;
        let (a, b) = if self.size >= other.size { (self, other) } else { (other, self) };
        let magnitude = a.multiply_magnitude(b);
        magnitude.negate_if(negative)
    }

    fn multiply_magnitude(&self, other: &LargeInt) -> LargeInt {
        debug_assert!(self.size >= other.size);
        if other.size <= 1 {
            let k = other.limbs.first().copied().unwrap_or(0);
            return self.multiply_u64(k, false);
        }
        if other.size < KARATSUBA_THRESHOLD {
            let mut z = vec![0u64; self.size + other.size];
            let size = limb::multiply_full(
                &self.limbs[..self.size],
                self.size,
                &other.limbs[..other.size],
                other.size,
                &mut z,
            );
            z.truncate(size);
            return LargeInt::raw(false, z);
        }
        // Karatsuba's splitting recursion is expressed with signed Value
        // operations (`shift_right`, `subtract`), which carry floor/sign
        // semantics that only make sense on a magnitude — so strip signs
        // before recursing, even though the caller may hold signed operands.
        self.abs().karatsuba(&other.abs())
    }

    /// Splits both operands at `n = ceil(bit_length(self) / 2)` bits and
    /// computes the three half-size sub-products `a_lo*b_lo`, `a_hi*b_hi`,
    /// `(a_lo+a_hi)*(b_lo+b_hi)` concurrently, then assembles
    /// `p1 + ((p3 - p1 - p2) << n) + (p2 << 2n)`. Each sub-product may itself
    /// recurse into Karatsuba and fan out further; [`crate::pool::with_scope`]
    /// joins transitively.
    #[tracing::instrument(level = "debug", skip_all, fields(a_size = self.size, b_size = other.size))]
    fn karatsuba(&self, other: &LargeInt) -> LargeInt {
        tracing::debug!("fanning out karatsuba sub-products");
        let n = self.bit_length().div_ceil(2);
        let a_hi = self.shift_right(n as i64);
        let a_lo = self.subtract(&a_hi.shift_left(n as i64));
        let b_hi = other.shift_right(n as i64);
        let b_lo = other.subtract(&b_hi.shift_left(n as i64));
        let a_sum = a_lo.add(&a_hi);
        let b_sum = b_lo.add(&b_hi);

        let results = crate::pool::with_scope::<LargeInt, _>(|pool| {
            pool.submit("p1", {
                let a_lo = a_lo.clone();
                let b_lo = b_lo.clone();
                move || a_lo.multiply_large(&b_lo)
            });
            pool.submit("p2", {
                let a_hi = a_hi.clone();
                let b_hi = b_hi.clone();
                move || a_hi.multiply_large(&b_hi)
            });
            pool.submit("p3", move || a_sum.multiply_large(&b_sum));
        });
        let p1 = &results["p1"];
        let p2 = &results["p2"];
        let p3 = &results["p3"];

        let middle = p3.subtract(p1).subtract(p2);
        p1.add(&middle.shift_left(n as i64)).add(&p2.shift_left(2 * n as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn multiply_matches_native_i64_within_range(a: i32, b: i32) -> bool {
        let (a, b) = (a as i64, b as i64);
        let expected = a.wrapping_mul(b);
        let got = LargeInt::from_i64(a).multiply_large(&LargeInt::from_i64(b));
        // i32 x i32 never overflows i64, so no wraparound to worry about.
        got == LargeInt::from_i64(expected)
    }

    #[test]
    fn multiply_by_zero_and_one() {
        let v = LargeInt::parse("123456789012345678901234567890", 10).unwrap();
        assert!(v.multiply_large(&LargeInt::from_i64(0)).is_zero());
        assert_eq!(v.multiply_large(&LargeInt::from_i64(1)), v);
    }

    #[test]
    fn multiply_is_commutative() {
        let a = LargeInt::parse("98765432109876543210", 10).unwrap();
        let b = LargeInt::parse("12345678901234567890", 10).unwrap();
        assert_eq!(a.multiply_large(&b), b.multiply_large(&a));
    }

    #[test]
    fn end_to_end_scenario_large_square() {
        let million = LargeInt::parse("1000000000000000", 10).unwrap();
        let squared = million.multiply_large(&million);
        assert_eq!(squared.to_text(10), "1000000000000000000000000000000");
    }

    #[test]
    fn karatsuba_path_matches_schoolbook_on_large_operands() {
        // Exercise the Karatsuba recursion (operands well past the
        // schoolbook threshold) and check against repeated addition-based
        // squaring via a smaller schoolbook multiply for cross-validation.
        let a = LargeInt::parse(&"7".repeat(2000), 10).unwrap();
        let b = LargeInt::parse(&"3".repeat(2000), 10).unwrap();
        let via_karatsuba = a.multiply_large(&b);
        let mut schoolbook_z = vec![0u64; a.size() + b.size()];
        let size = limb::multiply_full(a.limbs(), a.size(), b.limbs(), b.size(), &mut schoolbook_z);
        schoolbook_z.truncate(size);
        let via_schoolbook = LargeInt::raw(false, schoolbook_z);
        assert_eq!(via_karatsuba, via_schoolbook);
    }

    #[test]
    fn distributive_law() {
        let a = LargeInt::from_i64(12345);
        let b = LargeInt::from_i64(6789);
        let c = LargeInt::from_i64(-4321);
        let lhs = a.multiply_large(&b.add(&c));
        let rhs = a.multiply_large(&b).add(&a.multiply_large(&c));
        assert_eq!(lhs, rhs);
    }
}

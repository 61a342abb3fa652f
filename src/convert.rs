//! Two's-complement byte I/O, radix parsing and formatting, and conversions
//! to and from native numeric types.

use crate::error::{LargeIntError, ParseFailure, Result};
use crate::limb::MASK_63;
use crate::value::LargeInt;
use std::fmt;
use std::str::FromStr;

impl LargeInt {
    /// Builds a value directly from an unsigned 64-bit magnitude.
    pub fn from_u64(v: u64) -> LargeInt {
        if v == 0 {
            return LargeInt::from_i64(0);
        }
        if v <= MASK_63 {
            LargeInt::raw(false, vec![v])
        } else {
            LargeInt::raw(false, vec![v & MASK_63, v >> 63])
        }
    }

    /// Extracts the low 64 bits of the magnitude. Used internally where the
    /// caller has already established the value is small enough that no
    /// information is lost (e.g. [`Self::inverse_scaled`]'s base case).
    pub(crate) fn to_u64_lossy(&self) -> u64 {
        match self.size {
            0 => 0,
            1 => self.limbs[0],
            _ => self.limbs[0] | (self.limbs[1] << 63),
        }
    }

    /// Parses big-endian two's-complement bytes (compatible with the
    /// canonical big-integer byte encoding): accumulate the bytes as an
    /// unsigned base-256 number, then subtract `2^(8*len)` when the sign
    /// bit is set — the standard two's-complement decode, expressed
    /// directly in terms of this crate's own add/multiply/shift rather than
    /// hand-packed bit twiddling.
    pub fn from_bytes(bytes: &[u8]) -> LargeInt {
        if bytes.is_empty() {
            return LargeInt::from_i64(0);
        }
        let negative = bytes[0] & 0x80 != 0;
        let base = LargeInt::from_u64(256);
        let mut acc = LargeInt::from_i64(0);
        for &b in bytes {
            acc = acc.multiply_large(&base).add(&LargeInt::from_u64(b as u64));
        }
        if negative {
            let modulus = LargeInt::from_i64(1).shift_left((bytes.len() * 8) as i64);
            acc = acc.subtract(&modulus);
        }
        acc
    }

    /// Alias for [`Self::from_bytes`]: the byte encoding this crate reads
    /// and writes already *is* the canonical big-integer byte form (the
    /// same big-endian two's complement the standard library's reference
    /// big-integer type round-trips through), so there's no separate
    /// conversion to perform.
    pub fn from_canonical_bigint(bytes: &[u8]) -> LargeInt {
        Self::from_bytes(bytes)
    }

    /// Encodes as big-endian two's complement, minimal length
    /// `bit_length() / 8 + 1` (a zero value is a single `0x00` byte).
    pub fn to_bytes(&self) -> Vec<u8> {
        let nbytes = (self.bit_length() as usize) / 8 + 1;
        let unsigned = if self.negative {
            LargeInt::from_i64(1).shift_left((nbytes * 8) as i64).add(self)
        } else {
            self.clone()
        };
        let mut bytes = vec![0u8; nbytes];
        let mut remaining = unsigned;
        for i in (0..nbytes).rev() {
            let (q, r) = remaining.divide_i32(256).expect("256 is a nonzero constant divisor");
            bytes[i] = r.to_u64_lossy() as u8;
            remaining = q;
        }
        bytes
    }

    /// Writes [`Self::to_bytes`] into `dst[offset..]`, failing if there
    /// isn't room.
    pub fn to_bytes_into(&self, dst: &mut [u8], offset: usize) -> Result<usize> {
        let encoded = self.to_bytes();
        if dst.len() < offset + encoded.len() {
            return Err(LargeIntError::BufferTooSmall { need: offset + encoded.len(), have: dst.len() });
        }
        dst[offset..offset + encoded.len()].copy_from_slice(&encoded);
        Ok(encoded.len())
    }

    /// Parses an optionally `+`/`-` prefixed run of digits in `radix`
    /// (`[2, 36]`), using `0-9` then `a-z`/`A-Z`.
    pub fn parse(input: &str, radix: u32) -> Result<LargeInt> {
        if !(2..=36).contains(&radix) {
            return Err(LargeIntError::ParseError {
                input: input.to_string(),
                radix,
                reason: ParseFailure::InvalidRadix,
            });
        }
        let mut chars = input.chars().peekable();
        let negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };

        let mut acc = LargeInt::from_i64(0);
        let radix_value = LargeInt::from_u64(radix as u64);
        let mut saw_digit = false;
        for c in chars {
            let digit = c
                .to_digit(radix)
                .ok_or_else(|| LargeIntError::ParseError {
                    input: input.to_string(),
                    radix,
                    reason: ParseFailure::InvalidDigit(c),
                })?;
            saw_digit = true;
            acc = acc.multiply_large(&radix_value).add(&LargeInt::from_u64(digit as u64));
        }
        if !saw_digit {
            return Err(LargeIntError::ParseError {
                input: input.to_string(),
                radix,
                reason: ParseFailure::Empty,
            });
        }
        acc.negative = negative && !acc.is_zero();
        Ok(acc)
    }

    /// Formats into `sink` in `radix` (`[2, 36]`), `-` prefix for negatives,
    /// no `+` for positives, `"0"` for zero.
    pub fn format(&self, sink: &mut impl fmt::Write, radix: u32) -> fmt::Result {
        debug_assert!((2..=36).contains(&radix));
        if self.is_zero() {
            return sink.write_char('0');
        }
        if self.negative {
            sink.write_char('-')?;
        }
        let mut digits = Vec::new();
        let mut remainder = self.abs();
        let radix_i32 = radix as i32;
        while !remainder.is_zero() {
            let (q, r) = remainder.divide_i32(radix_i32).expect("radix is a nonzero constant");
            let digit = r.to_u64_lossy() as u32;
            digits.push(std::char::from_digit(digit, radix).expect("digit within radix range"));
            remainder = q;
        }
        for c in digits.iter().rev() {
            sink.write_char(*c)?;
        }
        Ok(())
    }

    /// Decimal text. Shorthand for `format(sink, 10)`.
    pub fn to_text(&self, radix: u32) -> String {
        let mut s = String::new();
        self.format(&mut s, radix).expect("writing to a String cannot fail");
        s
    }

    /// Lossy narrowing to `i32` (two's-complement truncation, documented as
    /// lossy rather than checked).
    pub fn to_i32(&self) -> i32 {
        self.to_i64() as i32
    }

    /// Lossy narrowing to `i64`.
    pub fn to_i64(&self) -> i64 {
        let mag = self.to_u64_lossy();
        if self.negative { (mag as i64).wrapping_neg() } else { mag as i64 }
    }

    /// Converts to the nearest representable `f64`. For values spanning
    /// more than two limbs, only the top two limbs contribute (the low-order
    /// bits are below `f64`'s representable precision and are dropped,
    /// relying on `f64`'s own round-to-nearest conversion from the
    /// resulting exact integer approximation).
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let approx = if self.size <= 2 {
            self.limbs[..self.size]
                .iter()
                .rev()
                .fold(0f64, |acc, &w| acc * (1u64 << 63) as f64 + w as f64)
        } else {
            let top = self.limbs[self.size - 1] as f64;
            let second = self.limbs[self.size - 2] as f64;
            let magnitude = top * (1u64 << 63) as f64 + second;
            magnitude * 2f64.powi(63 * (self.size as i32 - 2))
        };
        if self.negative { -approx } else { approx }
    }

    /// Converts to the nearest representable `f32` via `f64`.
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}

impl fmt::Display for LargeInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(f, 10)
    }
}

impl FromStr for LargeInt {
    type Err = LargeIntError;
    fn from_str(s: &str) -> Result<LargeInt> {
        LargeInt::parse(s, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn to_text_end_to_end_scenarios() {
        let a = LargeInt::parse("123456789012345678901234567890", 10).unwrap();
        assert_eq!(a.to_text(10), "123456789012345678901234567890");
        let million = LargeInt::parse("1000000000000000", 10).unwrap();
        let squared = million.multiply_large(&million);
        assert_eq!(squared.to_text(10), "1000000000000000000000000000000");
    }

    #[test]
    fn zero_formats_as_zero_in_any_radix() {
        let z = LargeInt::from_i64(0);
        for radix in [2, 10, 16, 36] {
            assert_eq!(z.to_text(radix), "0");
        }
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(LargeInt::parse("", 10).is_err());
        assert!(LargeInt::parse("12x34", 10).is_err());
        assert!(LargeInt::parse("12", 1).is_err());
        assert!(LargeInt::parse("12", 37).is_err());
    }

    #[quickcheck]
    fn from_bytes_to_bytes_roundtrip(v: i64) -> bool {
        let value = LargeInt::from_i64(v);
        LargeInt::from_bytes(&value.to_bytes()) == value
    }

    #[quickcheck]
    fn parse_format_roundtrip_decimal(v: i64) -> bool {
        let value = LargeInt::from_i64(v);
        LargeInt::parse(&value.to_text(10), 10).unwrap() == value
    }

    #[quickcheck]
    fn parse_format_roundtrip_hex(v: i64) -> bool {
        let value = LargeInt::from_i64(v);
        LargeInt::parse(&value.to_text(16), 16).unwrap() == value
    }

    #[quickcheck]
    fn from_i64_to_i64_roundtrips(v: i64) -> bool {
        LargeInt::from_i64(v).to_i64() == v
    }

    #[test]
    fn to_bytes_zero_is_single_zero_byte() {
        assert_eq!(LargeInt::from_i64(0).to_bytes(), vec![0u8]);
    }

    #[test]
    fn display_and_fromstr_round_trip() {
        let v: LargeInt = "-9876543210987654321098765".parse().unwrap();
        assert_eq!(format!("{v}"), "-9876543210987654321098765");
    }
}

//! Fixed-width 128-bit natural numbers built from two 64-bit words.
//!
//! Only the two primitives the codecs need are provided: division by a
//! 64-bit divisor and a checked multiply-add. Both map onto single
//! 64×64→128 hardware operations instead of general 128-bit arithmetic.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Returned by [`Uint128::multiply_add`] when the exact result needs more than 128 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("number is out of range (need a 128-bit value)")]
pub struct Overflow;

/// Error parsing a [`Uint128`] from its hex text layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUint128Error {
    #[error("expected 32 hex digits, found {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit '{digit}' at position {position}")]
    InvalidDigit { digit: char, position: usize },
}

/// A 128-bit unsigned integer stored as `hi·2⁶⁴ + lo`.
///
/// Field order makes the derived ordering numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint128 {
    hi: u64,
    lo: u64,
}

impl Uint128 {
    pub const ZERO: Self = Self { hi: 0, lo: 0 };
    pub const MAX: Self = Self {
        hi: u64::MAX,
        lo: u64::MAX,
    };

    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// The most significant word.
    pub const fn hi(self) -> u64 {
        self.hi
    }

    /// The least significant word.
    pub const fn lo(self) -> u64 {
        self.lo
    }

    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Builds a value from 16 big-endian bytes (high word first), the usual UUID layout.
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        let mut i = 0;
        while i < 8 {
            hi[i] = bytes[i];
            lo[i] = bytes[i + 8];
            i += 1;
        }
        Self {
            hi: u64::from_be_bytes(hi),
            lo: u64::from_be_bytes(lo),
        }
    }

    pub const fn to_be_bytes(self) -> [u8; 16] {
        let hi = self.hi.to_be_bytes();
        let lo = self.lo.to_be_bytes();
        let mut out = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            out[i] = hi[i];
            out[i + 8] = lo[i];
            i += 1;
        }
        out
    }

    /// Divides by a 64-bit divisor, returning the quotient and remainder.
    ///
    /// Each step is a 128-by-64 division whose high word is already below the
    /// divisor, so the partial quotient always fits in 64 bits.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero, like integer division.
    pub fn divmod(self, divisor: u64) -> (Self, u64) {
        if self.hi < divisor {
            let (q, r) = div_wide(self.hi, self.lo, divisor);
            return (Self { hi: 0, lo: q }, r);
        }
        let (q_hi, r) = (self.hi / divisor, self.hi % divisor);
        let (q_lo, r) = div_wide(r, self.lo, divisor);
        (Self { hi: q_hi, lo: q_lo }, r)
    }

    /// Computes `self * multiplier + addend`.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] when the true result does not fit in 128 bits; the
    /// value never wraps.
    pub fn multiply_add(self, multiplier: u64, addend: u64) -> Result<Self, Overflow> {
        let (lo_hi, lo_lo) = mul_wide(self.lo, multiplier);
        let (hi_hi, hi_lo) = mul_wide(self.hi, multiplier);
        if hi_hi != 0 {
            return Err(Overflow);
        }

        let (lo, carry) = lo_lo.overflowing_add(addend);
        let (hi, c1) = lo_hi.overflowing_add(hi_lo);
        let (hi, c2) = hi.overflowing_add(u64::from(carry));
        if c1 || c2 {
            return Err(Overflow);
        }
        Ok(Self { hi, lo })
    }
}

/// 64×64→128 multiply, returned as (high, low) words.
#[inline]
fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let wide = u128::from(a) * u128::from(b);
    ((wide >> 64) as u64, wide as u64)
}

/// Divides the two-word numerator `hi:lo` by `divisor`. Requires `hi < divisor`.
#[inline]
fn div_wide(hi: u64, lo: u64, divisor: u64) -> (u64, u64) {
    debug_assert!(hi < divisor);
    let numerator = (u128::from(hi) << 64) | u128::from(lo);
    let divisor = u128::from(divisor);
    ((numerator / divisor) as u64, (numerator % divisor) as u64)
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        (u128::from(value.hi) << 64) | u128::from(value.lo)
    }
}

impl From<[u8; 16]> for Uint128 {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_be_bytes(bytes)
    }
}

impl From<Uint128> for [u8; 16] {
    fn from(value: Uint128) -> Self {
        value.to_be_bytes()
    }
}

/// Formats as `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            self.hi >> 32,
            (self.hi >> 16) & 0xffff,
            self.hi & 0xffff,
            self.lo >> 48,
            self.lo & 0xffff_ffff_ffff
        )
    }
}

/// Parses 32 hex digits; hyphens anywhere are ignored.
impl FromStr for Uint128 {
    type Err = ParseUint128Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut value: u128 = 0;
        let mut digits = 0;
        for (position, c) in s.chars().enumerate() {
            if c == '-' {
                continue;
            }
            let nibble = c
                .to_digit(16)
                .ok_or(ParseUint128Error::InvalidDigit { digit: c, position })?;
            digits += 1;
            if digits > 32 {
                continue;
            }
            value = (value << 4) | u128::from(nibble);
        }
        if digits != 32 {
            return Err(ParseUint128Error::InvalidLength(digits));
        }
        Ok(Self::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divmod_small_value() {
        let (q, r) = Uint128::new(0, 1000).divmod(57);
        assert_eq!(q, Uint128::new(0, 17));
        assert_eq!(r, 31);
    }

    #[test]
    fn test_divmod_matches_native() {
        let values = [
            0u128,
            1,
            u64::MAX as u128,
            (u64::MAX as u128) + 1,
            0x0123_4567_89ab_cdef_fedc_ba98_7654_3210,
            u128::MAX,
        ];
        let divisors = [1u64, 2, 57, 362_033_331_456_891_249, u64::MAX];
        for &v in &values {
            for &d in &divisors {
                let (q, r) = Uint128::from(v).divmod(d);
                assert_eq!(u128::from(q), v / d as u128, "{v} / {d}");
                assert_eq!(r as u128, v % d as u128, "{v} % {d}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_divmod_by_zero_panics() {
        let _ = Uint128::new(1, 1).divmod(0);
    }

    #[test]
    fn test_multiply_add_matches_native() {
        let cases = [
            (0u128, 57u64, 56u64),
            (1, u64::MAX, u64::MAX),
            (u64::MAX as u128, u64::MAX, 0),
            (0x0000_0000_ffff_ffff_ffff_ffff_ffff_ffff, 0xffff_ffff, 12),
        ];
        for (v, m, a) in cases {
            let expected = v.checked_mul(m as u128).and_then(|p| p.checked_add(a as u128));
            let got = Uint128::from(v).multiply_add(m, a).ok().map(u128::from);
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_multiply_add_overflow_from_high_word() {
        assert_eq!(Uint128::new(1 << 63, 0).multiply_add(2, 0), Err(Overflow));
    }

    #[test]
    fn test_multiply_add_overflow_from_carry() {
        // (2^128 - 1) * 1 + 1 only overflows through the low-word carry.
        assert_eq!(Uint128::MAX.multiply_add(1, 1), Err(Overflow));
        // hi * 3 still fits in a word; adding the low product's high word does not.
        assert_eq!(
            Uint128::new(0x5555_5555_5555_5555, u64::MAX).multiply_add(3, 0),
            Err(Overflow)
        );
    }

    #[test]
    fn test_multiply_add_exact_max() {
        let v = Uint128::new(u64::MAX, u64::MAX - 1);
        assert_eq!(v.multiply_add(1, 1), Ok(Uint128::MAX));
    }

    #[test]
    fn test_be_bytes_layout() {
        let mut bytes = [0u8; 16];
        bytes[7] = 1;
        let v = Uint128::from_be_bytes(bytes);
        assert_eq!(v, Uint128::new(1, 0));
        assert_eq!(v.to_be_bytes(), bytes);
    }

    #[test]
    fn test_display_and_parse() {
        let text = "0026636a-e9b3-4a88-9c66-bf49d8cad81f";
        let v: Uint128 = text.parse().unwrap();
        assert_eq!(v.hi(), 0x0026_636a_e9b3_4a88);
        assert_eq!(v.lo(), 0x9c66_bf49_d8ca_d81f);
        assert_eq!(v.to_string(), text);
        assert_eq!("0026636ae9b34a889c66bf49d8cad81f".parse::<Uint128>(), Ok(v));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1234".parse::<Uint128>(),
            Err(ParseUint128Error::InvalidLength(4))
        );
        assert_eq!(
            "g0000000-0000-0000-0000-000000000000".parse::<Uint128>(),
            Err(ParseUint128Error::InvalidDigit {
                digit: 'g',
                position: 0
            })
        );
        assert_eq!(
            "00000000-0000-0000-0000-0000000000000".parse::<Uint128>(),
            Err(ParseUint128Error::InvalidLength(33))
        );
    }
}

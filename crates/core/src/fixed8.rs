//! Fixed8: an exact decimal amount with 8 fractional digits.
//!
//! All asset amounts on the ledger are `value × 10^8` stored in an `i64`.
//! Arithmetic runs on that integer. Floating point is accepted only at the
//! boundary ([`Fixed8::from_f64`] / [`Fixed8::to_f64`]) and always passes
//! through an exact decimal first, so `0.1 + 0.2` is exactly `0.3`.

use crate::{CoreError, CoreResult};
use neo_io::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Number of fractional digits.
pub const FIXED8_DECIMALS: u32 = 8;

const FACTOR: i64 = 100_000_000;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed8(i64);

impl Fixed8 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(FACTOR);
    pub const SATOSHI: Self = Self(1);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    /// Wraps raw units of 10^-8.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    pub fn from_integer(value: i64) -> CoreResult<Self> {
        value
            .checked_mul(FACTOR)
            .map(Self)
            .ok_or(CoreError::Fixed8Overflow)
    }

    /// Rounds `value` to 8 places, half away from zero.
    pub fn from_decimal(value: Decimal) -> CoreResult<Self> {
        value
            .round_dp_with_strategy(FIXED8_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::from(FACTOR))
            .and_then(|scaled| scaled.to_i64())
            .map(Self)
            .ok_or(CoreError::Fixed8Overflow)
    }

    /// Converts a float through its shortest round-trip decimal rendering.
    pub fn from_f64(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidFixed8(value.to_string()));
        }
        value.to_string().parse()
    }

    #[inline]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, FIXED8_DECIMALS)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FACTOR as f64
    }

    /// Parses 16 hex digits holding the raw value in big-endian order.
    pub fn from_hex(value: &str) -> CoreResult<Self> {
        let bytes = neo_io::decode_hex(value)?;
        let raw: [u8; 8] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::InvalidFixed8(format!("expected 16 hex digits: {value}")))?;
        Ok(Self(i64::from_be_bytes(raw)))
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0.to_be_bytes())
    }

    /// Parses the wire form: 8 little-endian bytes as hex.
    pub fn from_reverse_hex(value: &str) -> CoreResult<Self> {
        Self::from_hex(&neo_io::reverse_hex(value)?)
    }

    pub fn to_reverse_hex(self) -> String {
        hex::encode(self.0.to_le_bytes())
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    #[inline]
    pub fn checked_neg(self) -> Option<Self> {
        self.0.checked_neg().map(Self)
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let product = self.0 as i128 * rhs.0 as i128;
        i64::try_from(div_round(product, FACTOR as i128)).ok().map(Self)
    }

    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            return None;
        }
        let numerator = self.0 as i128 * FACTOR as i128;
        i64::try_from(div_round(numerator, rhs.0 as i128)).ok().map(Self)
    }

    /// Largest whole amount not above `self`.
    pub fn floor(self) -> CoreResult<Self> {
        let whole = (self.0 as i128).div_euclid(FACTOR as i128) * FACTOR as i128;
        i64::try_from(whole).map(Self).map_err(|_| CoreError::Fixed8Overflow)
    }

    /// Smallest whole amount not below `self`.
    pub fn ceil(self) -> CoreResult<Self> {
        let raw = self.0 as i128;
        let factor = FACTOR as i128;
        let whole = (raw + factor - 1).div_euclid(factor) * factor;
        i64::try_from(whole).map(Self).map_err(|_| CoreError::Fixed8Overflow)
    }

    pub fn abs(self) -> CoreResult<Self> {
        self.0.checked_abs().map(Self).ok_or(CoreError::Fixed8Overflow)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

// Integer division rounding half away from zero.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) == (denominator < 0) {
            quotient + 1
        } else {
            quotient - 1
        }
    } else {
        quotient
    }
}

impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / FACTOR as u64;
        let frac = abs % FACTOR as u64;
        if frac == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{frac:08}");
        write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl fmt::Debug for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed8({self})")
    }
}

impl FromStr for Fixed8 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let decimal = if value.contains(['e', 'E']) {
            Decimal::from_scientific(value)
        } else {
            Decimal::from_str(value)
        }
        .map_err(|err| CoreError::InvalidFixed8(format!("{value}: {err}")))?;
        Self::from_decimal(decimal)
    }
}

impl TryFrom<f64> for Fixed8 {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl Add for Fixed8 {
    type Output = Self;

    /// Panics on overflow like integer addition; use [`Fixed8::checked_add`] for untrusted input.
    fn add(self, rhs: Self) -> Self {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => panic!("Fixed8 addition overflow"),
        }
    }
}

impl Sub for Fixed8 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match self.checked_sub(rhs) {
            Some(diff) => diff,
            None => panic!("Fixed8 subtraction overflow"),
        }
    }
}

impl Neg for Fixed8 {
    type Output = Self;

    fn neg(self) -> Self {
        match self.checked_neg() {
            Some(neg) => neg,
            None => panic!("Fixed8 negation overflow"),
        }
    }
}

impl AddAssign for Fixed8 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed8 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Fixed8 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Fixed8> for Fixed8 {
    fn sum<I: Iterator<Item = &'a Fixed8>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl NeoEncode for Fixed8 {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_i64(self.0);
    }
}

impl NeoDecode for Fixed8 {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        Ok(Self(reader.read_i64()?))
    }
}

impl serde::Serialize for Fixed8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Fixed8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(Fixed8Visitor)
    }
}

struct Fixed8Visitor;

impl<'de> serde::de::Visitor<'de> for Fixed8Visitor {
    type Value = Fixed8;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount as a number or string")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Fixed8, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Fixed8, E> {
        Fixed8::from_f64(v).map_err(E::custom)
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Fixed8, E> {
        Fixed8::from_integer(v).map_err(E::custom)
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Fixed8, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(CoreError::Fixed8Overflow))?;
        Fixed8::from_integer(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(value: &str) -> Fixed8 {
        value.parse().unwrap()
    }

    #[test]
    fn test_float_boundary_is_exact() {
        assert_eq!(Fixed8::from_f64(1.23456789).unwrap().to_string(), "1.23456789");
        assert_eq!(Fixed8::from_f64(1.23456789).unwrap().raw(), 123_456_789);

        let sum = Fixed8::from_f64(0.1).unwrap() + Fixed8::from_f64(0.2).unwrap();
        assert_eq!(sum.to_string(), "0.3");
        assert_eq!(sum.raw(), 30_000_000);
    }

    #[test]
    fn test_hex_forms() {
        let one = Fixed8::from_hex("0000000005f5e100").unwrap();
        assert_eq!(one, Fixed8::ONE);
        assert_eq!(one.to_f64(), 1.0);
        assert_eq!(one.to_hex(), "0000000005f5e100");
        assert_eq!(one.to_reverse_hex(), "00e1f50500000000");
        assert_eq!(Fixed8::from_reverse_hex("00e1f50500000000").unwrap(), one);
        assert!(Fixed8::from_hex("05f5e100").is_err());
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(f("0.000000005").raw(), 1);
        assert_eq!(f("0.000000015").raw(), 2);
        assert_eq!(f("0.0000000149").raw(), 1);
        assert_eq!(f("-0.000000005").raw(), -1);
        assert_eq!(f("0.0000000049").raw(), 0);
        assert_eq!(Fixed8::from_f64(0.000000005).unwrap().raw(), 1);
        assert_eq!(f("1e-8").raw(), 1);
        assert_eq!(f("2.5E3"), Fixed8::from_integer(2500).unwrap());
    }

    #[test]
    fn test_display_trims_zeros() {
        assert_eq!(Fixed8::ONE.to_string(), "1");
        assert_eq!(f("-0.5").to_string(), "-0.5");
        assert_eq!(f("100.10000000").to_string(), "100.1");
        assert_eq!(Fixed8::SATOSHI.to_string(), "0.00000001");
        assert_eq!(Fixed8::MAX.to_string(), "92233720368.54775807");
        assert_eq!(Fixed8::MIN.to_string(), "-92233720368.54775808");
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(Fixed8::from_f64(f64::NAN), Err(CoreError::InvalidFixed8(_))));
        assert!(matches!(
            Fixed8::from_f64(f64::INFINITY),
            Err(CoreError::InvalidFixed8(_))
        ));
        assert_eq!(Fixed8::from_f64(1e12), Err(CoreError::Fixed8Overflow));
        assert!(matches!("abc".parse::<Fixed8>(), Err(CoreError::InvalidFixed8(_))));
        assert_eq!(Fixed8::MAX.checked_add(Fixed8::SATOSHI), None);
    }

    #[test]
    fn test_mul_div_round() {
        assert_eq!(f("1.5").checked_mul(f("2")).unwrap(), f("3"));
        assert_eq!(f("0.00000001").checked_mul(f("0.5")).unwrap().raw(), 1);
        assert_eq!(f("1").checked_div(f("3")).unwrap(), f("0.33333333"));
        assert_eq!(f("2").checked_div(f("3")).unwrap(), f("0.66666667"));
        assert_eq!(f("-2").checked_div(f("3")).unwrap(), f("-0.66666667"));
        assert_eq!(f("1").checked_div(Fixed8::ZERO), None);
    }

    #[test]
    fn test_floor_ceil_abs() {
        assert_eq!(f("1.5").floor().unwrap(), f("1"));
        assert_eq!(f("-1.5").floor().unwrap(), f("-2"));
        assert_eq!(f("1.5").ceil().unwrap(), f("2"));
        assert_eq!(f("-1.5").ceil().unwrap(), f("-1"));
        assert_eq!(f("3").ceil().unwrap(), f("3"));
        assert_eq!(f("-3.2").abs().unwrap(), f("3.2"));
        assert!(Fixed8::MIN.abs().is_err());
    }

    #[test]
    fn test_wire_is_little_endian() {
        let mut buf = Vec::new();
        Fixed8::ONE.neo_encode(&mut buf);
        assert_eq!(hex::encode(&buf), "00e1f50500000000");
        assert_eq!(Fixed8::decode_all(&buf).unwrap(), Fixed8::ONE);
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let values: Vec<Fixed8> = serde_json::from_str(r#"["1.5", 2, 0.1, "0.00000001"]"#).unwrap();
        assert_eq!(values, vec![f("1.5"), f("2"), f("0.1"), Fixed8::SATOSHI]);
        assert_eq!(serde_json::to_string(&f("0.3")).unwrap(), "\"0.3\"");
    }

    #[test]
    fn test_sum() {
        let amounts = [f("0.1"), f("0.2"), f("0.3")];
        assert_eq!(amounts.iter().sum::<Fixed8>(), f("0.6"));
    }
}

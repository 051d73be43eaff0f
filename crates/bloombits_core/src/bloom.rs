//! Fixed-width block bloom filter (2048 bits).
//!
//! Bit position `i` lives in byte `BLOOM_BYTE_LENGTH - 1 - i/8`, mask `1 << (i % 8)`:
//! bit 0 is the low-order bit of the last byte. Producers and matchers depend on
//! this layout, so every reader and writer goes through `bit` / `set_bit`.

use crate::consts::{BLOOM_BIT_LENGTH, BLOOM_BYTE_LENGTH};
use crate::errors::{BloomBitsError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bloom(pub [u8; BLOOM_BYTE_LENGTH]);

#[inline]
fn locate(i: usize) -> (usize, u8) {
    (BLOOM_BYTE_LENGTH - 1 - i / 8, 1u8 << (i % 8))
}

impl Bloom {
    pub const fn zero() -> Self { Self([0u8; BLOOM_BYTE_LENGTH]) }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; BLOOM_BYTE_LENGTH] = bytes.try_into().map_err(|_| {
            BloomBitsError::InvalidBloomLength { len: bytes.len(), expected: BLOOM_BYTE_LENGTH }
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; BLOOM_BYTE_LENGTH] { &self.0 }

    /// Whether bit position `i` is set. Out-of-range positions read as unset.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        if i >= BLOOM_BIT_LENGTH { return false; }
        let (byte, mask) = locate(i);
        self.0[byte] & mask != 0
    }

    /// Sets bit position `i`; positions past `BLOOM_BIT_LENGTH` are ignored.
    pub fn set_bit(&mut self, i: usize) {
        if i >= BLOOM_BIT_LENGTH { return; }
        let (byte, mask) = locate(i);
        self.0[byte] |= mask;
    }

    pub fn accrue_bloom(&mut self, other: &Bloom) {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) { *a |= *b; }
    }

    pub fn is_empty(&self) -> bool { self.0.iter().all(|b| *b == 0) }

    /// Set bit positions in ascending order.
    pub fn set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        (0..BLOOM_BIT_LENGTH).filter(move |&i| self.bit(i))
    }
}

impl Default for Bloom {
    fn default() -> Self { Self::zero() }
}

impl From<[u8; BLOOM_BYTE_LENGTH]> for Bloom {
    fn from(bytes: [u8; BLOOM_BYTE_LENGTH]) -> Self { Self(bytes) }
}

impl fmt::Display for Bloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Bloom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<usize> = self.set_bits().collect();
        f.debug_tuple("Bloom").field(&bits).finish()
    }
}

impl FromStr for Bloom {
    type Err = BloomBitsError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Bloom {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bloom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_zero_is_low_bit_of_last_byte() {
        let mut b = Bloom::zero();
        b.set_bit(0);
        assert_eq!(b.0[BLOOM_BYTE_LENGTH - 1], 0x01);
        b.set_bit(15);
        assert_eq!(b.0[BLOOM_BYTE_LENGTH - 2], 0x80);
        b.set_bit(BLOOM_BIT_LENGTH - 1);
        assert_eq!(b.0[0], 0x80);
        assert_eq!(b.set_bits().collect::<Vec<_>>(), vec![0, 15, BLOOM_BIT_LENGTH - 1]);
    }

    #[test]
    fn out_of_range_bits_are_ignored() {
        let mut b = Bloom::zero();
        b.set_bit(BLOOM_BIT_LENGTH);
        assert!(b.is_empty());
        assert!(!b.bit(BLOOM_BIT_LENGTH + 7));
    }

    #[test]
    fn accrue_is_union() {
        let mut a = Bloom::zero();
        let mut b = Bloom::zero();
        a.set_bit(3);
        b.set_bit(700);
        a.accrue_bloom(&b);
        assert!(a.bit(3) && a.bit(700));
        assert_eq!(a.set_bits().count(), 2);
    }

    #[test]
    fn hex_text_form() {
        let mut b = Bloom::zero();
        b.set_bit(5);
        let text = b.to_string();
        assert_eq!(text.len(), 2 * BLOOM_BYTE_LENGTH);
        assert!(text.ends_with("20"));
        assert_eq!(format!("0x{text}").parse::<Bloom>().unwrap(), b);

        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<Bloom>(&json).unwrap(), b);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            Bloom::from_slice(&[0u8; 8]),
            Err(BloomBitsError::InvalidBloomLength { len: 8, .. })
        ));
        assert!(matches!("zz".parse::<Bloom>(), Err(BloomBitsError::Hex(_))));
        assert!(matches!("00ff".parse::<Bloom>(), Err(BloomBitsError::InvalidBloomLength { len: 2, .. })));
    }
}

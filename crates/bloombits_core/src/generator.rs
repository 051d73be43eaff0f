//! Rotated bloom bits for one section.
//!
//! A `Generator` takes the bloom filters of `sections` consecutive blocks, in order,
//! and transposes them: once full, `bitset(i)` holds one bit per block telling whether
//! that block's bloom had bit `i` set. Block `k` sits in byte `k / 8` under mask
//! `0x80 >> (k % 8)` (most significant bit first).
//!
//! One instance covers one section. Guards reject bad calls without touching state.

use crate::bloom::Bloom;
use crate::config::SectionConfig;
use crate::consts::BLOOM_BIT_LENGTH;
use crate::errors::{BloomBitsError, Result};
use std::fmt;
use tracing::{debug, trace};

pub struct Generator {
    // row `i` (`width` bytes at `i * width`) is the rotated bitset of bloom bit `i`
    bits: Vec<u8>,
    width: usize,
    sections: u64,
    next_bit: u64,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("sections", &self.sections)
            .field("next_bit", &self.next_bit)
            .field("bitset_bytes", &self.width)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Creates a generator for a section of `sections` blocks. `sections` must be
    /// a multiple of 8 so every bitset is whole bytes.
    pub fn new(sections: u64) -> Result<Self> {
        if sections % 8 != 0 {
            return Err(BloomBitsError::InvalidConfiguration { sections });
        }
        let width = usize::try_from(sections / 8)
            .map_err(|_| BloomBitsError::InvalidConfiguration { sections })?;
        let total = width
            .checked_mul(BLOOM_BIT_LENGTH)
            .ok_or(BloomBitsError::InvalidConfiguration { sections })?;
        let mut bits = Vec::new();
        bits.try_reserve_exact(total)
            .map_err(|_| BloomBitsError::InvalidConfiguration { sections })?;
        bits.resize(total, 0u8);
        debug!(sections, bitset_bytes = width, "bloom bits generator created");
        Ok(Self { bits, width, sections, next_bit: 0 })
    }

    pub fn from_config(cfg: &SectionConfig) -> Result<Self> { Self::new(cfg.sections) }

    pub fn sections(&self) -> u64 { self.sections }

    /// Offset the next `add_bloom` call must carry.
    pub fn next_index(&self) -> u64 { self.next_bit }

    pub fn is_complete(&self) -> bool { self.next_bit == self.sections }

    /// Writes the bloom of the block at `index` into every rotated bitset.
    /// `index` has to be the number of blooms added so far.
    pub fn add_bloom(&mut self, index: u64, bloom: &Bloom) -> Result<()> {
        if self.next_bit >= self.sections {
            return Err(BloomBitsError::SectionOutOfBounds { index, limit: self.sections });
        }
        if index != self.next_bit {
            return Err(BloomBitsError::UnexpectedIndex { expected: self.next_bit, got: index });
        }
        let byte_index = (self.next_bit / 8) as usize;
        let mask = 1u8 << (7 - (self.next_bit % 8) as u8);

        for i in bloom.set_bits() {
            self.bits[i * self.width + byte_index] |= mask;
        }
        self.next_bit += 1;
        trace!(index, "bloom rotated");

        if self.is_complete() {
            debug!(sections = self.sections, "bloom bits section complete");
        }
        Ok(())
    }

    /// Rotated bitset of bloom bit `idx`, `sections / 8` bytes long.
    /// Only available once the section is complete.
    pub fn bitset(&self, idx: usize) -> Result<&[u8]> {
        if !self.is_complete() {
            return Err(BloomBitsError::SectionIncomplete { added: self.next_bit, sections: self.sections });
        }
        if idx >= BLOOM_BIT_LENGTH {
            return Err(BloomBitsError::SectionOutOfBounds { index: idx as u64, limit: BLOOM_BIT_LENGTH as u64 });
        }
        let start = idx * self.width;
        Ok(&self.bits[start..start + self.width])
    }

    /// Hands every bitset to the caller, indexed by bloom bit position.
    /// An incomplete generator comes back untouched alongside the error.
    pub fn into_bitsets(self) -> std::result::Result<Vec<Vec<u8>>, (Self, BloomBitsError)> {
        if !self.is_complete() {
            let err = BloomBitsError::SectionIncomplete { added: self.next_bit, sections: self.sections };
            return Err((self, err));
        }
        let w = self.width;
        Ok((0..BLOOM_BIT_LENGTH).map(|i| self.bits[i * w..(i + 1) * w].to_vec()).collect())
    }
}

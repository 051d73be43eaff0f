use crate::consts::DEFAULT_SECTION_SIZE;
use crate::errors::{BloomBitsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Section sizing for a generator. `sections` is the number of blocks per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    #[serde(default = "default_sections")]
    pub sections: u64,
}

fn default_sections() -> u64 { DEFAULT_SECTION_SIZE }

impl Default for SectionConfig {
    fn default() -> Self {
        Self { sections: DEFAULT_SECTION_SIZE }
    }
}

impl SectionConfig {
    pub fn new(sections: u64) -> Result<Self> {
        let cfg = Self { sections };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sections % 8 != 0 {
            return Err(BloomBitsError::InvalidConfiguration { sections: self.sections });
        }
        Ok(())
    }

    /// Bytes in each per-bit bitset.
    pub fn bitset_len(&self) -> u64 { self.sections / 8 }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: SectionConfig = serde_json::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

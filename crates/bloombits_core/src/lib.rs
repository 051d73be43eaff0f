pub mod consts;
pub mod errors;
pub mod bloom;
pub mod config;
pub mod generator;

pub use bloom::Bloom;
pub use config::SectionConfig;
pub use consts::{BLOOM_BIT_LENGTH, BLOOM_BYTE_LENGTH, DEFAULT_SECTION_SIZE};
pub use errors::{BloomBitsError, Result};
pub use generator::Generator;

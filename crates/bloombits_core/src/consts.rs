// crates/bloombits_core/src/consts.rs

/// Size of a block bloom filter in bytes.
pub const BLOOM_BYTE_LENGTH: usize = 256;

/// Number of bit positions in a block bloom filter.
pub const BLOOM_BIT_LENGTH: usize = 8 * BLOOM_BYTE_LENGTH;

/// Blocks per section used when nothing else is configured.
pub const DEFAULT_SECTION_SIZE: u64 = 4096;

const _: () = { assert!(BLOOM_BIT_LENGTH == 2048); };
const _: () = { assert!(DEFAULT_SECTION_SIZE % 8 == 0); };

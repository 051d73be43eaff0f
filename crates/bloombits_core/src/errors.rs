use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomBitsError {
    #[error("section count {sections} not multiple of 8")]
    InvalidConfiguration { sections: u64 },

    #[error("bloom filter with unexpected index {got}, expected {expected}")]
    UnexpectedIndex { expected: u64, got: u64 },

    #[error("section out of bounds: {index} >= {limit}")]
    SectionOutOfBounds { index: u64, limit: u64 },

    #[error("bloom not fully generated yet ({added}/{sections} blooms)")]
    SectionIncomplete { added: u64, sections: u64 },

    #[error("bloom filter must be {expected} bytes, got {len}")]
    InvalidBloomLength { len: usize, expected: usize },

    #[error("Hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BloomBitsError>;

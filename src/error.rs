//! Error types for page encoding and archive assembly

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XtcError {
    #[error("Invalid magic tag (expected {0})")]
    InvalidMagic(&'static str),

    #[error("Unsupported container version: {0:#06x}")]
    UnsupportedVersion(u16),

    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(u8),

    #[error("Unsupported compression: {0}")]
    UnsupportedCompression(u8),

    #[error("Buffer truncated: need {needed} bytes, have {available}")]
    Truncated { needed: u64, available: u64 },

    #[error("Declared data size {declared} does not match a {width}x{height} bitmap ({expected} bytes)")]
    DataSizeMismatch {
        declared: u32,
        expected: u32,
        width: u16,
        height: u16,
    },

    #[error("Page checksum verification failed")]
    ChecksumMismatch,

    #[error("Index entry {index} disagrees with its page header: {entry_width}x{entry_height} vs {page_width}x{page_height}")]
    IndexMismatch {
        index: usize,
        entry_width: u16,
        entry_height: u16,
        page_width: u16,
        page_height: u16,
    },

    #[error("Archive has no pages")]
    EmptyArchive,

    #[error("Too many pages for one archive: {0}")]
    TooManyPages(usize),

    #[error("Thumbnail page {requested} out of range (1..={page_count})")]
    ThumbnailOutOfRange { requested: u16, page_count: u16 },

    #[error("Invalid page dimensions: {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    #[error("Sample grid is {actual} bytes, expected {expected} for the declared dimensions")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, XtcError>;

//! # xtc-rs - XTC e-reader archive packer
//!
//! `xtc-rs` builds page archives for XTC-based e-reader devices. An archive
//! is an ordered set of XTG pages: grayscale sources binarized against a
//! threshold into 1-bit-per-pixel bitmaps, each carried in a small checksummed
//! record, all bundled behind one container header and a fixed-width index.
//!
//! ## Archive layout
//!
//! ```text
//! +--------------------+  offset 0
//! | XTC header (48 B)  |  magic, version, page count, section offsets
//! +--------------------+  offset 48
//! | Index table        |  16 B per page: offset, length, width, height
//! +--------------------+  offset 48 + 16 * page_count
//! | Page blobs         |  XTG records, back to back, in page order
//! +--------------------+
//! | Thumbnail (opt.)   |  duplicate of one page's blob
//! +--------------------+
//! ```
//!
//! Every multi-byte field is little-endian. Each XTG record carries the
//! first 8 bytes of the MD5 digest of its packed payload, so readers can
//! verify pages without trusting the index.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use xtc_rs::{Archive, Page};
//!
//! # fn main() -> xtc_rs::Result<()> {
//! // Binarize two grayscale grids and bundle them
//! let white = vec![255u8; 480 * 800];
//! let black = vec![0u8; 480 * 800];
//!
//! let mut archive = Archive::new(vec![
//!     Page::from_luma(480, 800, &white, 200)?,
//!     Page::from_luma(480, 800, &black, 200)?,
//! ]);
//! archive.thumbnail = Some(1);
//! archive.write_to("book.xtc")?;
//! # Ok(())
//! # }
//! ```
//!
//! Converting image files or whole directories goes through [`pack`]:
//!
//! ```rust,no_run
//! use xtc_rs::pack::{self, PackOptions};
//!
//! # fn main() -> xtc_rs::Result<()> {
//! let archive = pack::pack_dir("scans/", &PackOptions::default())?;
//! archive.write_to("scans.xtc")?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod error;
pub mod header;
pub mod pack;
pub mod page;
pub mod source;

pub use archive::Archive;
pub use error::{Result, XtcError};
pub use header::{
    IndexEntry, ReadDirection, XtcHeader, HEADER_SIZE, INDEX_ENTRY_SIZE, XTC_MAGIC, XTC_VERSION,
};
pub use pack::{
    PackOptions, ARCHIVE_THRESHOLD, DEFAULT_HEIGHT, DEFAULT_WIDTH, EXPORT_THRESHOLD,
};
pub use page::{
    row_stride, ColorMode, Compression, Page, CHECKSUM_SIZE, PAGE_HEADER_SIZE, XTG_MAGIC,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

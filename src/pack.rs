use crate::archive::Archive;
use crate::error::{Result, XtcError};
use crate::header::ReadDirection;
use crate::page::Page;
use crate::source;
use std::path::Path;
use tracing::{debug, info};

/// Binarization threshold used when building a multi-page archive
pub const ARCHIVE_THRESHOLD: u8 = 200;

/// Binarization threshold used when exporting a single page
///
/// Deliberately distinct from [`ARCHIVE_THRESHOLD`]; the two operations
/// carry separate defaults and `--threshold` overrides either.
pub const EXPORT_THRESHOLD: u8 = 128;

/// Target page resolution of the reader device
pub const DEFAULT_WIDTH: u16 = 480;
pub const DEFAULT_HEIGHT: u16 = 800;

/// Conversion options shared by archive builds and single-page exports
#[derive(Debug, Clone, Copy)]
pub struct PackOptions {
    pub width: u16,
    pub height: u16,
    /// Overrides the operation's default threshold when set
    pub threshold: Option<u8>,
    pub read_direction: ReadDirection,
    /// 1-based page to duplicate as the trailing thumbnail
    pub thumbnail: Option<u16>,
}

impl Default for PackOptions {
    fn default() -> Self {
        PackOptions {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            threshold: None,
            read_direction: ReadDirection::LeftToRight,
            thumbnail: None,
        }
    }
}

/// Convert one image file into a page.
///
/// `default_threshold` applies when the options carry no override; archive
/// builds pass [`ARCHIVE_THRESHOLD`], single-page exports [`EXPORT_THRESHOLD`].
pub fn page_from_image<P: AsRef<Path>>(
    path: P,
    options: &PackOptions,
    default_threshold: u8,
) -> Result<Page> {
    let threshold = options.threshold.unwrap_or(default_threshold);
    let luma = source::load_luma(&path, options.width, options.height)?;
    debug!(path = %path.as_ref().display(), threshold, "binarizing image");
    Page::from_luma(options.width, options.height, luma.as_raw(), threshold)
}

/// Convert every `.png` of a directory (sorted by name) into one archive
pub fn pack_dir<P: AsRef<Path>>(dir: P, options: &PackOptions) -> Result<Archive> {
    let paths = source::scan_pngs(&dir)?;
    if paths.is_empty() {
        return Err(XtcError::EmptyArchive);
    }

    let mut pages = Vec::with_capacity(paths.len());
    for path in &paths {
        pages.push(page_from_image(path, options, ARCHIVE_THRESHOLD)?);
    }
    info!(dir = %dir.as_ref().display(), pages = pages.len(), "converted directory");

    Ok(Archive {
        pages,
        read_direction: options.read_direction,
        thumbnail: options.thumbnail,
    })
}

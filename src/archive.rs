use crate::error::{Result, XtcError};
use crate::header::{IndexEntry, ReadDirection, XtcHeader, INDEX_ENTRY_SIZE};
use crate::page::Page;
use std::path::Path;
use tracing::{debug, info};

/// An ordered set of pages plus container options
///
/// File layout produced by [`Archive::to_bytes`]:
/// ```text
/// [Header (48 bytes)][Index (16 bytes per page)][Page blobs, in order]
/// [Thumbnail duplicate (optional)]
/// ```
///
/// The thumbnail, when requested, is a byte-for-byte duplicate of one page's
/// blob appended after the last ordinary page. It is always appended there
/// regardless of which page it duplicates, and the index table does not
/// cover it; only `thumbnail_offset` in the header points at it.
#[derive(Debug, Clone)]
pub struct Archive {
    pub pages: Vec<Page>,
    pub read_direction: ReadDirection,
    /// 1-based page whose blob is duplicated as the trailing thumbnail
    pub thumbnail: Option<u16>,
}

impl Archive {
    pub fn new(pages: Vec<Page>) -> Self {
        Archive {
            pages,
            read_direction: ReadDirection::default(),
            thumbnail: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(XtcError::EmptyArchive);
        }
        if self.pages.len() > u16::MAX as usize {
            return Err(XtcError::TooManyPages(self.pages.len()));
        }
        let page_count = self.pages.len() as u16;
        if let Some(thumbnail) = self.thumbnail {
            if thumbnail == 0 || thumbnail > page_count {
                return Err(XtcError::ThumbnailOutOfRange {
                    requested: thumbnail,
                    page_count,
                });
            }
        }
        Ok(())
    }

    /// Serialize the whole archive into one buffer.
    ///
    /// Index offsets are a strict left-to-right prefix sum over the page
    /// blob lengths, starting at the header's data offset.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.validate()?;

        let page_count = self.pages.len() as u16;
        let blobs: Vec<Vec<u8>> = self.pages.iter().map(Page::to_bytes).collect();

        let mut header = XtcHeader::new(page_count, self.read_direction);

        let mut index = Vec::with_capacity(self.pages.len());
        let mut next_offset = header.data_offset;
        for (page, blob) in self.pages.iter().zip(&blobs) {
            index.push(IndexEntry {
                offset: next_offset,
                length: blob.len() as u32,
                width: page.width,
                height: page.height,
            });
            next_offset += blob.len() as u64;
        }

        // The thumbnail lands after the last ordinary page, wherever its
        // source page sits in the set.
        let thumbnail_index = self.thumbnail.map(|n| n as usize - 1);
        if thumbnail_index.is_some() {
            header.has_thumbnail = 1;
            header.thumbnail_offset = next_offset;
        }

        debug!(
            page_count,
            index_offset = header.index_offset,
            data_offset = header.data_offset,
            thumbnail_offset = header.thumbnail_offset,
            "assembling archive"
        );

        let thumbnail_len = thumbnail_index.map_or(0, |i| blobs[i].len());
        let mut bytes = Vec::with_capacity(next_offset as usize + thumbnail_len);
        bytes.extend_from_slice(&header.to_bytes());
        for entry in &index {
            bytes.extend_from_slice(&entry.to_bytes());
        }
        for blob in &blobs {
            bytes.extend_from_slice(blob);
        }
        if let Some(i) = thumbnail_index {
            bytes.extend_from_slice(&blobs[i]);
        }

        Ok(bytes)
    }

    /// Parse an archive, validating the header, every index entry, and
    /// every page checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = XtcHeader::from_bytes(bytes)?;
        if header.page_count == 0 {
            return Err(XtcError::EmptyArchive);
        }

        let page_count = header.page_count as usize;
        let index_bytes = slice_at(
            bytes,
            header.index_offset,
            (page_count * INDEX_ENTRY_SIZE) as u64,
        )?;

        let mut pages = Vec::with_capacity(page_count);
        for i in 0..page_count {
            let entry = IndexEntry::from_bytes(&index_bytes[i * INDEX_ENTRY_SIZE..])?;
            let blob = slice_at(bytes, entry.offset, entry.length as u64)?;
            let page = Page::from_bytes(blob)?;
            if page.width != entry.width || page.height != entry.height {
                return Err(XtcError::IndexMismatch {
                    index: i,
                    entry_width: entry.width,
                    entry_height: entry.height,
                    page_width: page.width,
                    page_height: page.height,
                });
            }
            pages.push(page);
        }

        // The format stores no back-reference for the thumbnail; the
        // checksum identifies which page it duplicates.
        let thumbnail = if header.has_thumbnail != 0 {
            if (bytes.len() as u64) < header.thumbnail_offset {
                return Err(XtcError::Truncated {
                    needed: header.thumbnail_offset,
                    available: bytes.len() as u64,
                });
            }
            let thumb = Page::from_bytes(&bytes[header.thumbnail_offset as usize..])?;
            let checksum = thumb.checksum();
            let position = pages.iter().position(|p| p.checksum() == checksum);
            if position.is_none() {
                debug!("trailing thumbnail does not duplicate any page");
            }
            position.map(|i| i as u16 + 1)
        } else {
            None
        };

        Ok(Archive {
            pages,
            read_direction: header.read_direction,
            thumbnail,
        })
    }

    /// Assemble in memory, then write the file in one operation so a failed
    /// build never leaves a truncated archive behind.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(&path, &bytes)?;
        info!(
            path = %path.as_ref().display(),
            pages = self.pages.len(),
            bytes = bytes.len(),
            "wrote archive"
        );
        Ok(())
    }

    /// Read and parse an archive file
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

/// Bounds-checked subslice in u64 offset space. Hostile headers can carry
/// offsets that overflow usize arithmetic, so the check happens before any
/// cast back to usize.
fn slice_at(bytes: &[u8], offset: u64, len: u64) -> Result<&[u8]> {
    let end = offset.checked_add(len).ok_or(XtcError::Truncated {
        needed: u64::MAX,
        available: bytes.len() as u64,
    })?;
    if (bytes.len() as u64) < end {
        return Err(XtcError::Truncated {
            needed: end,
            available: bytes.len() as u64,
        });
    }
    Ok(&bytes[offset as usize..end as usize])
}

use crate::error::{Result, XtcError};

pub const XTC_MAGIC: [u8; 4] = *b"XTC\0";
pub const XTC_VERSION: u16 = 0x0100;
pub const HEADER_SIZE: usize = 48;
pub const INDEX_ENTRY_SIZE: usize = 16;

/// Page ordering as presented by the reader device
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDirection {
    /// Western-style page flow (default)
    LeftToRight = 0,
    /// Manga-style page flow
    RightToLeft = 1,
}

impl ReadDirection {
    /// Parse a reading direction from a byte value
    ///
    /// Unknown values default to `LeftToRight` for forward compatibility.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::RightToLeft,
            _ => Self::LeftToRight, // Default for unknown values
        }
    }
}

impl Default for ReadDirection {
    fn default() -> Self {
        ReadDirection::LeftToRight
    }
}

/// Archive container header (first 48 bytes of every XTC file)
///
/// Holds the page count, reading direction, the section flags, and the
/// absolute offsets of the index table, the page data region, and the
/// optional trailing thumbnail. The metadata and chapter sections exist on
/// the wire but are never populated, so their flags stay zero.
#[derive(Debug, Clone, Copy)]
pub struct XtcHeader {
    /// Format version (0x0100)
    pub version: u16,

    /// Number of ordinary pages (the thumbnail duplicate is not counted)
    pub page_count: u16,

    pub read_direction: ReadDirection,

    /// Reserved section flag, always 0
    pub has_metadata: u8,

    /// 1 when a thumbnail duplicate trails the last page
    pub has_thumbnail: u8,

    /// Reserved section flag, always 0
    pub has_chapters: u8,

    /// Reader bookmark, always written as 0
    pub current_page: u32,

    /// Reserved section offset, always 0
    pub metadata_offset: u64,

    /// Absolute offset of the index table (always 48)
    pub index_offset: u64,

    /// Absolute offset of the first page blob
    pub data_offset: u64,

    /// Absolute offset of the thumbnail duplicate, 0 when absent
    pub thumbnail_offset: u64,
}

impl XtcHeader {
    /// Create a header for `page_count` pages with derived section offsets
    pub fn new(page_count: u16, read_direction: ReadDirection) -> Self {
        let index_offset = HEADER_SIZE as u64;
        let data_offset = index_offset + page_count as u64 * INDEX_ENTRY_SIZE as u64;
        XtcHeader {
            version: XTC_VERSION,
            page_count,
            read_direction,
            has_metadata: 0,
            has_thumbnail: 0,
            has_chapters: 0,
            current_page: 0,
            metadata_offset: 0,
            index_offset,
            data_offset,
            thumbnail_offset: 0,
        }
    }

    /// Validate the version field
    pub fn validate(&self) -> Result<()> {
        if self.version != XTC_VERSION {
            return Err(XtcError::UnsupportedVersion(self.version));
        }
        Ok(())
    }

    /// Serialize the header to exactly `HEADER_SIZE` bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);

        bytes.extend_from_slice(&XTC_MAGIC);
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.page_count.to_le_bytes());
        bytes.push(self.read_direction as u8);
        bytes.push(self.has_metadata);
        bytes.push(self.has_thumbnail);
        bytes.push(self.has_chapters);
        bytes.extend_from_slice(&self.current_page.to_le_bytes());
        bytes.extend_from_slice(&self.metadata_offset.to_le_bytes());
        bytes.extend_from_slice(&self.index_offset.to_le_bytes());
        bytes.extend_from_slice(&self.data_offset.to_le_bytes());
        bytes.extend_from_slice(&self.thumbnail_offset.to_le_bytes());

        assert_eq!(bytes.len(), HEADER_SIZE);
        bytes
    }

    /// Deserialize and validate a header
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(XtcError::Truncated {
                needed: HEADER_SIZE as u64,
                available: bytes.len() as u64,
            });
        }
        if bytes[0..4] != XTC_MAGIC {
            return Err(XtcError::InvalidMagic("XTC"));
        }

        let mut offset = 4;

        let version = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        offset += 2;

        let page_count = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        offset += 2;

        let read_direction = ReadDirection::from_u8(bytes[offset]);
        let has_metadata = bytes[offset + 1];
        let has_thumbnail = bytes[offset + 2];
        let has_chapters = bytes[offset + 3];
        offset += 4;

        let current_page = u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ]);
        offset += 4;

        let metadata_offset = u64::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]);
        offset += 8;

        let index_offset = u64::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]);
        offset += 8;

        let data_offset = u64::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]);
        offset += 8;

        let thumbnail_offset = u64::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]);

        let header = XtcHeader {
            version,
            page_count,
            read_direction,
            has_metadata,
            has_thumbnail,
            has_chapters,
            current_page,
            metadata_offset,
            index_offset,
            data_offset,
            thumbnail_offset,
        };
        header.validate()?;

        Ok(header)
    }
}

/// One record of the index table: where a page blob lives and its geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Absolute offset of the page blob
    pub offset: u64,

    /// Full blob length in bytes (page header + payload)
    pub length: u32,

    pub width: u16,
    pub height: u16,
}

impl IndexEntry {
    /// Serialize the entry to exactly `INDEX_ENTRY_SIZE` bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(INDEX_ENTRY_SIZE);
        bytes.extend_from_slice(&self.offset.to_le_bytes());
        bytes.extend_from_slice(&self.length.to_le_bytes());
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        assert_eq!(bytes.len(), INDEX_ENTRY_SIZE);
        bytes
    }

    /// Deserialize one entry from the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < INDEX_ENTRY_SIZE {
            return Err(XtcError::Truncated {
                needed: INDEX_ENTRY_SIZE as u64,
                available: bytes.len() as u64,
            });
        }

        Ok(IndexEntry {
            offset: u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
            length: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            width: u16::from_le_bytes([bytes[12], bytes[13]]),
            height: u16::from_le_bytes([bytes[14], bytes[15]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_creation() {
        let header = XtcHeader::new(3, ReadDirection::LeftToRight);
        assert_eq!(header.version, XTC_VERSION);
        assert_eq!(header.page_count, 3);
        assert_eq!(header.index_offset, 48);
        assert_eq!(header.data_offset, 96);
        assert_eq!(header.thumbnail_offset, 0);
    }

    #[test]
    fn test_header_exact_size() {
        let bytes = XtcHeader::new(7, ReadDirection::RightToLeft).to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
    }

    #[test]
    fn test_header_layout() {
        let mut header = XtcHeader::new(3, ReadDirection::RightToLeft);
        header.has_thumbnail = 1;
        header.thumbnail_offset = 406;
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"XTC\0");
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 0x0100);
        assert_eq!(u16::from_le_bytes([bytes[6], bytes[7]]), 3);
        assert_eq!(bytes[8], 1); // read direction
        assert_eq!(bytes[9], 0); // metadata flag
        assert_eq!(bytes[10], 1); // thumbnail flag
        assert_eq!(bytes[11], 0); // chapters flag
        assert_eq!(u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]), 0);
        assert_eq!(u64::from_le_bytes(bytes[16..24].try_into().unwrap()), 0);
        assert_eq!(u64::from_le_bytes(bytes[24..32].try_into().unwrap()), 48);
        assert_eq!(u64::from_le_bytes(bytes[32..40].try_into().unwrap()), 96);
        assert_eq!(u64::from_le_bytes(bytes[40..48].try_into().unwrap()), 406);
    }

    #[test]
    fn test_header_roundtrip() {
        let mut header = XtcHeader::new(12, ReadDirection::RightToLeft);
        header.has_thumbnail = 1;
        header.thumbnail_offset = 12345;

        let decoded = XtcHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(decoded.page_count, 12);
        assert_eq!(decoded.read_direction, ReadDirection::RightToLeft);
        assert_eq!(decoded.has_thumbnail, 1);
        assert_eq!(decoded.index_offset, 48);
        assert_eq!(decoded.data_offset, 48 + 12 * 16);
        assert_eq!(decoded.thumbnail_offset, 12345);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = XtcHeader::new(1, ReadDirection::LeftToRight).to_bytes();
        bytes[3] = b'!';
        assert!(matches!(
            XtcHeader::from_bytes(&bytes),
            Err(XtcError::InvalidMagic("XTC"))
        ));
    }

    #[test]
    fn test_rejects_bad_version() {
        let mut bytes = XtcHeader::new(1, ReadDirection::LeftToRight).to_bytes();
        bytes[4..6].copy_from_slice(&0x0200u16.to_le_bytes());
        assert!(matches!(
            XtcHeader::from_bytes(&bytes),
            Err(XtcError::UnsupportedVersion(0x0200))
        ));
    }

    #[test]
    fn test_rejects_truncation() {
        let bytes = XtcHeader::new(1, ReadDirection::LeftToRight).to_bytes();
        assert!(matches!(
            XtcHeader::from_bytes(&bytes[..HEADER_SIZE - 1]),
            Err(XtcError::Truncated { .. })
        ));
    }

    #[test]
    fn test_read_direction_from_u8() {
        assert_eq!(ReadDirection::from_u8(0), ReadDirection::LeftToRight);
        assert_eq!(ReadDirection::from_u8(1), ReadDirection::RightToLeft);
        assert_eq!(ReadDirection::from_u8(255), ReadDirection::LeftToRight); // Unknown falls back
    }

    #[test]
    fn test_index_entry_exact_size() {
        let entry = IndexEntry {
            offset: 96,
            length: 100,
            width: 480,
            height: 800,
        };
        assert_eq!(entry.to_bytes().len(), INDEX_ENTRY_SIZE);
    }

    #[test]
    fn test_index_entry_layout() {
        let entry = IndexEntry {
            offset: 96,
            length: 100,
            width: 480,
            height: 800,
        };
        let bytes = entry.to_bytes();
        assert_eq!(u64::from_le_bytes(bytes[0..8].try_into().unwrap()), 96);
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 100);
        assert_eq!(u16::from_le_bytes([bytes[12], bytes[13]]), 480);
        assert_eq!(u16::from_le_bytes([bytes[14], bytes[15]]), 800);
    }

    #[test]
    fn test_index_entry_roundtrip() {
        let entry = IndexEntry {
            offset: 0xDEAD_BEEF_0123,
            length: 48022,
            width: 480,
            height: 800,
        };
        let decoded = IndexEntry::from_bytes(&entry.to_bytes()).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_index_entry_rejects_truncation() {
        let bytes = [0u8; INDEX_ENTRY_SIZE - 1];
        assert!(matches!(
            IndexEntry::from_bytes(&bytes),
            Err(XtcError::Truncated { .. })
        ));
    }
}

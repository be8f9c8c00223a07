use crate::error::{Result, XtcError};
use md5::{Digest, Md5};
use std::path::Path;

/// Magic tag opening every XTG page record
pub const XTG_MAGIC: [u8; 4] = *b"XTG\0";

/// Size of the fixed page header in bytes (magic through checksum)
pub const PAGE_HEADER_SIZE: usize = 22;

/// Stored checksum width: the first 8 bytes of the payload's MD5 digest
pub const CHECKSUM_SIZE: usize = 8;

/// Color mode field of a page record
///
/// Only monochrome (1 bit per pixel) is defined; the field exists on the
/// wire for future formats and anything else is rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorMode {
    /// 1-bpp black and white bitmap
    Monochrome = 0,
}

impl ColorMode {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ColorMode::Monochrome),
            _ => Err(XtcError::UnsupportedColorMode(value)),
        }
    }
}

/// Compression field of a page record
///
/// Payloads are always stored raw; the field is reserved on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Compression {
    /// Uncompressed packed rows
    None = 0,
}

impl Compression {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Compression::None),
            _ => Err(XtcError::UnsupportedCompression(value)),
        }
    }
}

/// Bytes per packed row: one bit per pixel, rows padded to whole bytes
pub const fn row_stride(width: u16) -> usize {
    (width as usize + 7) / 8
}

/// A single XTG page: a threshold-binarized bitmap plus record metadata
///
/// Record layout (little-endian):
/// ```text
/// [Magic "XTG\0" (4)][width u16][height u16][color_mode u8][compression u8]
/// [data_size u32][checksum (8)][packed rows (data_size bytes)]
/// ```
///
/// Pixels are packed MSB-first within each byte; pixel `x` of a row lives at
/// bit `7 - (x % 8)` of byte `x / 8`. Rows are padded to whole bytes and the
/// padding bits are always zero. The checksum is recomputed from `data` at
/// serialization time, so a `Page` never carries a stale one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub width: u16,
    pub height: u16,
    pub color_mode: ColorMode,
    pub compression: Compression,
    /// Packed 1-bpp rows, exactly `row_stride(width) * height` bytes
    pub data: Vec<u8>,
}

impl Page {
    /// Binarize a row-major 8-bit grayscale grid into a page.
    ///
    /// A pixel becomes 1 (white) when its sample is `>= threshold`, 0
    /// otherwise. `samples` must hold exactly `width * height` bytes.
    pub fn from_luma(width: u16, height: u16, samples: &[u8], threshold: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(XtcError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(XtcError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let stride = row_stride(width);
        let mut data = vec![0u8; stride * height as usize];
        for y in 0..height as usize {
            let row = &samples[y * width as usize..(y + 1) * width as usize];
            for (x, &sample) in row.iter().enumerate() {
                if sample >= threshold {
                    data[y * stride + x / 8] |= 1 << (7 - (x % 8));
                }
            }
        }

        Ok(Page {
            width,
            height,
            color_mode: ColorMode::Monochrome,
            compression: Compression::None,
            data,
        })
    }

    /// Unpack the bitmap back into a row-major 0/255 sample grid.
    ///
    /// Row padding bits are skipped, so the result is always exactly
    /// `width * height` bytes.
    pub fn to_luma(&self) -> Vec<u8> {
        let stride = row_stride(self.width);
        let mut samples = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                let byte = self.data[y * stride + x / 8];
                let bit = (byte >> (7 - (x % 8))) & 1;
                samples.push(if bit == 1 { 255 } else { 0 });
            }
        }
        samples
    }

    /// First 8 bytes of the MD5 digest of the packed payload
    pub fn checksum(&self) -> [u8; CHECKSUM_SIZE] {
        let mut hasher = Md5::new();
        hasher.update(&self.data);
        let digest = hasher.finalize();

        let mut checksum = [0u8; CHECKSUM_SIZE];
        checksum.copy_from_slice(&digest[..CHECKSUM_SIZE]);
        checksum
    }

    /// Payload length in bytes (`row_stride(width) * height`)
    pub fn data_size(&self) -> u32 {
        self.data.len() as u32
    }

    /// Serialize the page record (header + payload)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PAGE_HEADER_SIZE + self.data.len());
        bytes.extend_from_slice(&XTG_MAGIC);
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.push(self.color_mode as u8);
        bytes.push(self.compression as u8);
        bytes.extend_from_slice(&self.data_size().to_le_bytes());
        bytes.extend_from_slice(&self.checksum());
        bytes.extend_from_slice(&self.data);
        assert_eq!(bytes.len(), PAGE_HEADER_SIZE + self.data.len());
        bytes
    }

    /// Deserialize a page record, verifying structure and checksum.
    ///
    /// Bytes beyond the declared payload are ignored, so a page can be
    /// decoded in place at an offset inside a larger buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PAGE_HEADER_SIZE {
            return Err(XtcError::Truncated {
                needed: PAGE_HEADER_SIZE as u64,
                available: bytes.len() as u64,
            });
        }
        if bytes[0..4] != XTG_MAGIC {
            return Err(XtcError::InvalidMagic("XTG"));
        }

        let width = u16::from_le_bytes([bytes[4], bytes[5]]);
        let height = u16::from_le_bytes([bytes[6], bytes[7]]);
        let color_mode = ColorMode::from_u8(bytes[8])?;
        let compression = Compression::from_u8(bytes[9])?;
        let data_size = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);
        let mut stored = [0u8; CHECKSUM_SIZE];
        stored.copy_from_slice(&bytes[14..PAGE_HEADER_SIZE]);

        let expected = (row_stride(width) * height as usize) as u64;
        if data_size as u64 != expected {
            return Err(XtcError::DataSizeMismatch {
                declared: data_size,
                expected: expected as u32,
                width,
                height,
            });
        }
        let end = PAGE_HEADER_SIZE as u64 + data_size as u64;
        if (bytes.len() as u64) < end {
            return Err(XtcError::Truncated {
                needed: end,
                available: bytes.len() as u64,
            });
        }
        let data = bytes[PAGE_HEADER_SIZE..end as usize].to_vec();

        let page = Page {
            width,
            height,
            color_mode,
            compression,
            data,
        };
        if page.checksum() != stored {
            return Err(XtcError::ChecksumMismatch);
        }
        Ok(page)
    }

    /// Write the serialized record to a file in one operation
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Read and decode a standalone page file
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

use crate::error::Result;
use image::imageops::FilterType;
use image::GrayImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decode an image file and produce target-resolution grayscale samples.
///
/// Sources that are not already at the target resolution are resampled with
/// a Lanczos filter before grayscale conversion.
pub fn load_luma<P: AsRef<Path>>(path: P, width: u16, height: u16) -> Result<GrayImage> {
    let mut img = image::open(&path)?;
    if img.width() != width as u32 || img.height() != height as u32 {
        debug!(
            path = %path.as_ref().display(),
            source_width = img.width(),
            source_height = img.height(),
            target_width = width,
            target_height = height,
            "resampling source image"
        );
        img = img.resize_exact(width as u32, height as u32, FilterType::Lanczos3);
    }
    Ok(img.to_luma8())
}

/// Collect the `.png` files of a directory in lexicographic order.
///
/// Extension matching is case-insensitive. Subdirectories are not descended
/// into; non-files are skipped.
pub fn scan_pngs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        {
            paths.push(path);
        }
    }
    paths.sort();

    debug!(dir = %dir.as_ref().display(), count = paths.len(), "scanned directory");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use tempfile::tempdir;

    #[test]
    fn test_scan_pngs_filters_and_sorts() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("a.PNG"), b"").unwrap();
        std::fs::write(dir.path().join("c.txt"), b"").unwrap();
        std::fs::write(dir.path().join("noext"), b"").unwrap();
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();

        let paths = scan_pngs(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn test_scan_pngs_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(scan_pngs(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_luma_passthrough() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let img = GrayImage::from_pixel(4, 8, Luma([137u8]));
        img.save(&path).unwrap();

        let luma = load_luma(&path, 4, 8).unwrap();
        assert_eq!(luma.dimensions(), (4, 8));
        // Already at target resolution, so samples survive byte-exact
        assert!(luma.as_raw().iter().all(|&s| s == 137));
    }

    #[test]
    fn test_load_luma_resamples() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.png");
        let img = GrayImage::from_pixel(64, 64, Luma([255u8]));
        img.save(&path).unwrap();

        let luma = load_luma(&path, 10, 20).unwrap();
        assert_eq!(luma.dimensions(), (10, 20));
        // A uniform white source stays white through the resampler
        assert!(luma.as_raw().iter().all(|&s| s > 250));
    }

    #[test]
    fn test_load_luma_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_luma(dir.path().join("absent.png"), 4, 4);
        assert!(result.is_err());
    }
}

//! Photo Acquisition Layer
//!
//! Loads a photographed puzzle from disk and decodes it to RGBA. Camera
//! capture itself happens outside this tool; any file the `image` crate can
//! decode is accepted.

pub mod frame;

use std::path::Path;
use tracing::{debug, info};

use crate::capture::frame::ScanImage;
use crate::scan::ScanError;

/// Load and decode a photo
///
/// A missing file or a photo without pixels is reported as an error rather
/// than aborting, so the caller can prompt for another photo.
pub fn load_photo(path: &Path) -> Result<ScanImage, ScanError> {
    if !path.is_file() {
        return Err(ScanError::MissingImage(path.to_path_buf()));
    }

    debug!("Decoding photo {:?}", path);
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let image = ScanImage::new(rgba.into_raw(), width, height).with_source(path);
    if image.is_empty() {
        return Err(ScanError::EmptyImage(path.to_path_buf()));
    }

    info!("Loaded photo {:?} ({}x{})", path, width, height);
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_photo_is_recoverable() {
        let result = load_photo(Path::new("/nonexistent/puzzle.png"));
        assert!(matches!(result, Err(ScanError::MissingImage(_))));
    }

    #[test]
    fn test_load_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("puzzle.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.dimensions(), (4, 3));
        assert_eq!(photo.data.len(), 4 * 3 * 4);
        assert_eq!(photo.source(), Some(path.as_path()));
    }

    #[test]
    fn test_undecodable_photo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("puzzle.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(matches!(load_photo(&path), Err(ScanError::Decode(_))));
    }

    #[test]
    fn test_empty_image() {
        let image = ScanImage::new(Vec::new(), 0, 0);
        assert!(image.is_empty());
        assert!(image.source().is_none());
    }
}

//! Frame data structures for photographed puzzles

use std::path::{Path, PathBuf};

/// A decoded photo ready for recognition
#[derive(Debug, Clone)]
pub struct ScanImage {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// File the photo was loaded from, if any
    pub source: Option<PathBuf>,
}

impl ScanImage {
    /// Create an in-memory image with no backing file
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            source: None,
        }
    }

    /// Attach the file the pixels came from
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get image dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the image carries any pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

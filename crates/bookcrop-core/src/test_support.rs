//! In-memory image I/O for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ImageIoError;
use crate::imaging::{ImageFormat, ImageIo, PixelBuffer};

/// A written output file.
#[derive(Debug, Clone)]
pub struct Written {
    pub path: PathBuf,
    pub image: PixelBuffer,
    pub format: ImageFormat,
}

/// Serves source images from a map and records every encode.
#[derive(Debug, Default)]
pub struct MemoryImageIo {
    pub sources: HashMap<PathBuf, PixelBuffer>,
    pub written: RefCell<Vec<Written>>,
    pub decodes: RefCell<Vec<PathBuf>>,
    /// Encodes to these paths fail.
    pub fail_encode: Vec<PathBuf>,
}

impl MemoryImageIo {
    pub fn with_source(mut self, path: impl Into<PathBuf>, image: PixelBuffer) -> Self {
        self.sources.insert(path.into(), image);
        self
    }

    pub fn written_names(&self) -> Vec<String> {
        self.written
            .borrow()
            .iter()
            .filter_map(|w| w.path.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect()
    }

    pub fn written_at(&self, path: &Path) -> Option<Written> {
        self.written.borrow().iter().find(|w| w.path == path).cloned()
    }
}

impl ImageIo for MemoryImageIo {
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ImageIoError> {
        self.sources
            .get(path)
            .map(|img| (img.width, img.height))
            .ok_or_else(|| ImageIoError::Decode {
                path: path.to_path_buf(),
                reason: "not found".to_string(),
            })
    }

    fn decode(&self, path: &Path) -> Result<PixelBuffer, ImageIoError> {
        self.decodes.borrow_mut().push(path.to_path_buf());
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| ImageIoError::Decode {
                path: path.to_path_buf(),
                reason: "not found".to_string(),
            })
    }

    fn encode(
        &self,
        image: &PixelBuffer,
        path: &Path,
        format: ImageFormat,
        _jpeg_quality: u8,
    ) -> Result<(), ImageIoError> {
        if self.fail_encode.iter().any(|p| p == path) {
            return Err(ImageIoError::Encode {
                path: path.to_path_buf(),
                reason: "disk full".to_string(),
            });
        }
        self.written.borrow_mut().push(Written {
            path: path.to_path_buf(),
            image: image.clone(),
            format,
        });
        Ok(())
    }
}

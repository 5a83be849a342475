//! Project-wide settings and defaults.

use serde::{Deserialize, Serialize};

use crate::geometry::CropSize;

/// Crop size given to a freshly scanned project.
pub const DEFAULT_CROP_SIZE: CropSize = CropSize {
    width: 800,
    height: 1200,
};

/// Name of the project document stored inside the source folder.
pub const DOCUMENT_FILE_NAME: &str = "crop_data.json";

/// Folder created under the source folder when no output folder was chosen.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "cropped";

/// File extensions picked up by a folder scan (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp"];

/// Bounding box the preview is fitted into (width, height).
pub const PREVIEW_MAX_SIZE: (u32, u32) = (800, 600);

/// Container policy for exported crops. One policy applies to the whole project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    /// Always write JPEG (`.jpg`).
    #[default]
    Jpeg,
    /// Always write PNG (`.png`).
    Png,
    /// Keep each source file's own container and extension.
    MatchSource,
}

/// Settings for an export pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub format: OutputFormat,
    /// JPEG quality (1-100). Ignored for lossless containers.
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            jpeg_quality: 95,
        }
    }
}

/// True if `extension` names a file the folder scan accepts.
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

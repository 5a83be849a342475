//! Schema of the persisted project document.
//!
//! Every field other than `filename` is optional on read so documents written
//! by older versions, or edited by hand, still load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ExportSettings;
use crate::geometry::BoxPosition;
use crate::model::{PageMode, Placement};

/// The whole `crop_data.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDocument {
    #[serde(default)]
    pub source_folder: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_crop_size: Option<SizeRecord>,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_settings: Option<ExportSettings>,
}

/// Stored crop size. Signed so that bad values can be detected and replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRecord {
    pub width: i64,
    pub height: i64,
}

/// One image's stored layout, keyed by filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PageMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxes: Option<BoxesRecord>,
    #[serde(default)]
    pub mode_customized: bool,
    #[serde(default)]
    pub position_customized: bool,
}

/// Stored box positions: `{"single": ..}` or `{"left": .., "right": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoxesRecord {
    Double {
        left: BoxPosition,
        right: BoxPosition,
    },
    Single {
        single: BoxPosition,
    },
}

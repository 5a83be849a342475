//! Error types for every layer of the crop core.
//!
//! Model-layer errors are caller errors and leave the project untouched.
//! Image I/O errors are reported per file during export. Persistence errors
//! are recoverable: a project can always be rebuilt from a fresh folder scan.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{BoxTag, PageMode};

/// Errors from the pure coordinate transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Scale factors must be finite and strictly positive.
    #[error("Invalid scale factor: {0} (must be > 0)")]
    InvalidScale(f64),
}

/// Errors returned by project model operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Crop width or height is zero or negative.
    #[error("Invalid crop dimensions: width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: i64, height: i64 },

    /// The image index does not exist in the project.
    #[error("Image index {index} out of bounds (project has {len} images)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The box tag does not exist on an entry in this mode.
    #[error("Box {tag:?} does not exist on a {mode:?} page")]
    ModeMismatch { tag: BoxTag, mode: PageMode },

    /// A preview coordinate conversion failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors from the image I/O capability.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageIoError {
    /// The source image could not be read or decoded.
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The output image could not be encoded or written.
    #[error("Failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    /// The file extension does not map to a supported container.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Errors from reading or writing the persisted project document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistError {
    /// The document is not valid JSON or does not match the schema.
    #[error("Malformed crop document: {0}")]
    DocumentParse(String),

    /// The document file could not be read or written.
    #[error("I/O error on {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

/// Batch-level export errors. Per-file failures go into the report instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// The output folder does not exist and could not be created.
    #[error("Cannot create output folder {}: {reason}", path.display())]
    OutputFolder { path: PathBuf, reason: String },
}

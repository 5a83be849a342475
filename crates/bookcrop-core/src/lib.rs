//! Bookcrop Core - batch cropping of book scans
//!
//! This crate manages fixed-size crop boxes over a folder of scanned pages.
//! Each scan is either a single page or a two-page spread; edits made on one
//! page carry forward to the pages after it unless those were adjusted by hand.
//! Cropped pages are exported with white padding wherever a box leaves the scan.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod imaging;
pub mod model;
pub mod persist;
pub mod propagate;
pub mod scan;

#[cfg(test)]
mod test_support;

pub use config::{ExportSettings, OutputFormat};
pub use error::{ExportError, GeometryError, ImageIoError, ModelError, PersistError};
pub use export::{crop_with_padding, export_project, ExportFailure, ExportReport};
pub use geometry::{BoxPosition, CropSize};
pub use imaging::{FsImageIo, ImageFormat, ImageIo, PixelBuffer};
pub use model::{BoxTag, ImageEntry, PageBoxes, PageMode, Placement, Project, ScannedImage};
pub use persist::{open_project, save_project};
pub use scan::scan_folder;

//! Crop project model.
//!
//! A [`Project`] is the ordered batch of scanned pages together with the
//! project-wide crop size and the placement template that drives forward
//! propagation of edits.
//!
//! ## Invariants
//!
//! - Every box has the project's crop size; boxes only store their top-left corner
//! - A [`PageBoxes::Double`] entry always has `left.y == right.y`
//! - The image order is fixed once the project is built
//! - Filenames are unique within a project

mod entry;
mod placement;
mod project;

use serde::{Deserialize, Serialize};

pub use entry::{ImageEntry, PageBoxes};
pub use placement::Placement;
pub use project::Project;

/// Whether a scan is exported as one page or as a two-page spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    #[default]
    Single,
    Double,
}

/// Names one box on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxTag {
    /// The only box of a single-page entry.
    Single,
    /// Left page of a spread.
    Left,
    /// Right page of a spread.
    Right,
}

impl BoxTag {
    /// Suffix appended to the exported file stem, if any.
    pub fn file_suffix(self) -> Option<&'static str> {
        match self {
            BoxTag::Single => None,
            BoxTag::Left => Some("_left"),
            BoxTag::Right => Some("_right"),
        }
    }
}

/// A scanned source file and its decoded dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

impl ScannedImage {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            filename: filename.into(),
            width,
            height,
        }
    }
}

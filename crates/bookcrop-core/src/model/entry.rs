//! Per-image entries and their crop boxes.

use std::path::{Path, PathBuf};

use crate::error::ModelError;
use crate::geometry::{single_anchor, BoxPosition, CropSize};

use super::{BoxTag, PageMode, ScannedImage};

/// The crop boxes of one entry. The variant is the entry's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBoxes {
    Single(BoxPosition),
    Double {
        left: BoxPosition,
        right: BoxPosition,
    },
}

impl PageBoxes {
    /// Build a spread, aligning the right box to the left box's `y`.
    pub fn double(left: BoxPosition, right: BoxPosition) -> Self {
        PageBoxes::Double {
            left,
            right: BoxPosition::new(right.x, left.y),
        }
    }

    pub fn mode(&self) -> PageMode {
        match self {
            PageBoxes::Single(_) => PageMode::Single,
            PageBoxes::Double { .. } => PageMode::Double,
        }
    }

    /// Position of the tagged box.
    pub fn position(&self, tag: BoxTag) -> Result<BoxPosition, ModelError> {
        match (self, tag) {
            (PageBoxes::Single(pos), BoxTag::Single) => Ok(*pos),
            (PageBoxes::Double { left, .. }, BoxTag::Left) => Ok(*left),
            (PageBoxes::Double { right, .. }, BoxTag::Right) => Ok(*right),
            _ => Err(ModelError::ModeMismatch {
                tag,
                mode: self.mode(),
            }),
        }
    }

    /// Move the tagged box. On a spread the sibling follows vertically.
    pub fn set_position(&mut self, tag: BoxTag, pos: BoxPosition) -> Result<(), ModelError> {
        // Validate first so a mismatch leaves the boxes untouched.
        self.position(tag)?;
        match self {
            PageBoxes::Single(single) => *single = pos,
            PageBoxes::Double { left, right } => {
                if tag == BoxTag::Left {
                    *left = pos;
                    right.y = pos.y;
                } else {
                    *right = pos;
                    left.y = pos.y;
                }
            }
        }
        Ok(())
    }

    /// Reshape the boxes for `mode`.
    ///
    /// Single to double keeps the box as the left page and puts the right page
    /// one crop width further right at the same height. Double to single keeps
    /// the left page. Same mode is a no-op.
    pub fn with_mode(self, mode: PageMode, crop: CropSize) -> PageBoxes {
        match (self, mode) {
            (PageBoxes::Single(pos), PageMode::Double) => PageBoxes::Double {
                left: pos,
                right: BoxPosition::new(pos.x.saturating_add_unsigned(crop.width), pos.y),
            },
            (PageBoxes::Double { left, .. }, PageMode::Single) => PageBoxes::Single(left),
            (boxes, _) => boxes,
        }
    }

    /// All boxes with their tags, left to right.
    pub fn tagged(&self) -> Vec<(BoxTag, BoxPosition)> {
        match *self {
            PageBoxes::Single(pos) => vec![(BoxTag::Single, pos)],
            PageBoxes::Double { left, right } => {
                vec![(BoxTag::Left, left), (BoxTag::Right, right)]
            }
        }
    }
}

/// One source image of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub(crate) filename: String,
    pub(crate) path: PathBuf,
    pub(crate) original_width: u32,
    pub(crate) original_height: u32,
    pub(crate) boxes: PageBoxes,
    pub(crate) mode_customized: bool,
    pub(crate) position_customized: bool,
}

impl ImageEntry {
    /// A fresh single-page entry with its box centered.
    pub(crate) fn new(scanned: &ScannedImage, source_folder: &Path, crop: CropSize) -> Self {
        Self {
            filename: scanned.filename.clone(),
            path: source_folder.join(&scanned.filename),
            original_width: scanned.width,
            original_height: scanned.height,
            boxes: PageBoxes::Single(single_anchor(scanned.width, scanned.height, crop)),
            mode_customized: false,
            position_customized: false,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    pub fn mode(&self) -> PageMode {
        self.boxes.mode()
    }

    pub fn boxes(&self) -> &PageBoxes {
        &self.boxes
    }

    pub fn mode_customized(&self) -> bool {
        self.mode_customized
    }

    pub fn position_customized(&self) -> bool {
        self.position_customized
    }
}

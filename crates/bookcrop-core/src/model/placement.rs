//! Placement template shared by pages that follow the latest edit.
//!
//! Positions are remembered as offsets from each page's default anchor, so a
//! page of a different size still gets the box in the same relative place.

use serde::{Deserialize, Serialize};

use crate::geometry::{double_anchors, single_anchor, CropSize, Offset};

use super::{ImageEntry, PageBoxes, PageMode};

/// Offsets from the default anchors for each kind of box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub single: Offset,
    pub left: Offset,
    pub right: Offset,
}

impl Placement {
    /// Capture the offsets of `entry`'s boxes. Offsets for the other mode are kept.
    pub fn record(&mut self, entry: &ImageEntry, crop: CropSize) {
        let (width, height) = (entry.original_width, entry.original_height);
        match entry.boxes {
            PageBoxes::Single(pos) => {
                self.single = pos.offset_from(single_anchor(width, height, crop));
            }
            PageBoxes::Double { left, right } => {
                let (left_anchor, right_anchor) = double_anchors(width, height, crop);
                self.left = left.offset_from(left_anchor);
                self.right = right.offset_from(right_anchor);
                // Spread anchors share y, so both pages share the vertical offset.
                self.right.dy = self.left.dy;
            }
        }
    }

    /// Boxes for an image of the given size laid out with this template.
    pub fn layout(&self, mode: PageMode, width: u32, height: u32, crop: CropSize) -> PageBoxes {
        match mode {
            PageMode::Single => {
                PageBoxes::Single(single_anchor(width, height, crop).translate(self.single))
            }
            PageMode::Double => {
                let (left_anchor, right_anchor) = double_anchors(width, height, crop);
                PageBoxes::double(
                    left_anchor.translate(self.left),
                    right_anchor.translate(self.right),
                )
            }
        }
    }
}

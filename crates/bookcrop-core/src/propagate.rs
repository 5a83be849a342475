//! Forward propagation of edits through the page sequence.
//!
//! An edit on one page is pushed to every later page whose matching field the
//! user has not set explicitly. Customized pages are skipped, not treated as a
//! barrier: pages after them still receive the edit.
//!
//! Propagation never marks pages as customized and is idempotent for a given
//! change and customization state.

use crate::geometry::CropSize;
use crate::model::{ImageEntry, PageMode, Placement};

/// A change to push forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Switch uncustomized pages to this mode, reshaping their own boxes.
    Mode(PageMode),
    /// Lay out uncustomized pages with this template, each in its current mode.
    Position(Placement),
}

/// Apply `change` to `images[from_index..]`.
///
/// Returns the number of entries whose boxes actually changed.
pub fn propagate(
    images: &mut [ImageEntry],
    crop: CropSize,
    from_index: usize,
    change: &Propagation,
) -> usize {
    let mut changed = 0;

    for entry in images.iter_mut().skip(from_index) {
        let updated = match change {
            Propagation::Mode(mode) => {
                if entry.mode_customized {
                    continue;
                }
                entry.boxes.with_mode(*mode, crop)
            }
            Propagation::Position(placement) => {
                if entry.position_customized {
                    continue;
                }
                placement.layout(
                    entry.boxes.mode(),
                    entry.original_width,
                    entry.original_height,
                    crop,
                )
            }
        };

        if updated != entry.boxes {
            entry.boxes = updated;
            changed += 1;
        }
    }

    log::debug!(
        "Propagated {:?} from index {}: {} entries changed",
        change,
        from_index,
        changed
    );
    changed
}


// ============================================================================
// Property-Based Tests
// ============================================================================

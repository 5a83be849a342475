//! The project: ordered entries, crop size and placement template.

use std::path::{Path, PathBuf};

use crate::config::{ExportSettings, DEFAULT_CROP_SIZE, DEFAULT_OUTPUT_SUBDIR};
use crate::error::ModelError;
use crate::geometry::{delta_to_original, BoxPosition, CropSize, OriginalRect};
use crate::propagate::{propagate, Propagation};

use super::{BoxTag, ImageEntry, PageMode, Placement, ScannedImage};

/// A batch of scans being cropped.
///
/// All edits go through the setters below. Each setter validates its input
/// before touching anything, so a failed call leaves the project unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub(crate) source_folder: PathBuf,
    pub(crate) output_folder: PathBuf,
    pub(crate) crop_size: CropSize,
    pub(crate) placement: Placement,
    pub(crate) export_settings: ExportSettings,
    pub(crate) images: Vec<ImageEntry>,
}

impl Project {
    /// Build a fresh project from a folder scan.
    ///
    /// Entries are ordered by filename and start as centered single pages.
    pub fn new(source_folder: impl Into<PathBuf>, scan: Vec<ScannedImage>) -> Self {
        let source_folder = source_folder.into();
        let output_folder = source_folder.join(DEFAULT_OUTPUT_SUBDIR);
        let scan = normalize_scan(scan);
        let images = scan
            .iter()
            .map(|scanned| ImageEntry::new(scanned, &source_folder, DEFAULT_CROP_SIZE))
            .collect();

        Self {
            source_folder,
            output_folder,
            crop_size: DEFAULT_CROP_SIZE,
            placement: Placement::default(),
            export_settings: ExportSettings::default(),
            images,
        }
    }

    pub fn source_folder(&self) -> &Path {
        &self.source_folder
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn set_output_folder(&mut self, folder: impl Into<PathBuf>) {
        self.output_folder = folder.into();
    }

    pub fn crop_size(&self) -> CropSize {
        self.crop_size
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export_settings
    }

    pub fn set_export_settings(&mut self, settings: ExportSettings) {
        self.export_settings = settings;
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Entry at `index`.
    pub fn entry(&self, index: usize) -> Result<&ImageEntry, ModelError> {
        self.images.get(index).ok_or(ModelError::IndexOutOfBounds {
            index,
            len: self.images.len(),
        })
    }

    /// Set the mode of one entry and push it to the following pages.
    ///
    /// The entry is marked as mode-customized; later pages whose mode the user
    /// never set explicitly switch too, each reshaping its own boxes.
    pub fn set_mode(&mut self, index: usize, mode: PageMode) -> Result<(), ModelError> {
        self.entry(index)?;
        let crop = self.crop_size;

        let entry = &mut self.images[index];
        entry.boxes = entry.boxes.with_mode(mode, crop);
        entry.mode_customized = true;
        log::debug!("Set {} to {:?} mode", entry.filename, mode);

        propagate(&mut self.images, crop, index + 1, &Propagation::Mode(mode));
        Ok(())
    }

    /// Move one box of an entry and push the new placement to the following pages.
    ///
    /// On a spread the sibling box takes the same `y`. The entry is marked as
    /// position-customized.
    pub fn set_box_position(
        &mut self,
        index: usize,
        tag: BoxTag,
        x: i32,
        y: i32,
    ) -> Result<(), ModelError> {
        self.entry(index)?.boxes.position(tag)?;
        let crop = self.crop_size;

        let entry = &mut self.images[index];
        entry.boxes.set_position(tag, BoxPosition::new(x, y))?;
        entry.position_customized = true;
        self.placement.record(entry, crop);
        log::debug!("Moved {:?} box of {} to ({}, {})", tag, entry.filename, x, y);

        propagate(
            &mut self.images,
            crop,
            index + 1,
            &Propagation::Position(self.placement),
        );
        Ok(())
    }

    /// Replace the crop size of every box in the project.
    ///
    /// Size is a project-wide export contract: it is not scoped to later pages
    /// and ignores customization flags. Box positions are kept as they are.
    pub fn set_global_crop_size(&mut self, width: i64, height: i64) -> Result<(), ModelError> {
        let size = CropSize::new(width, height)
            .ok_or(ModelError::InvalidDimensions { width, height })?;
        self.crop_size = size;
        log::debug!("Crop size set to {}x{}", size.width, size.height);
        Ok(())
    }

    /// Apply a drag measured in preview pixels to one box.
    ///
    /// Returns the box's new position in original pixels.
    pub fn move_box_by_preview_delta(
        &mut self,
        index: usize,
        tag: BoxTag,
        dx: f64,
        dy: f64,
        scale: f64,
    ) -> Result<BoxPosition, ModelError> {
        let offset = delta_to_original(dx, dy, scale)?;
        let current = self.entry(index)?.boxes.position(tag)?;
        let moved = current.translate(offset);
        self.set_box_position(index, tag, moved.x, moved.y)?;
        Ok(moved)
    }

    /// Apply the final rectangle of an interactive resize.
    ///
    /// The rectangle's size becomes the project crop size and its corner the
    /// box position. Nothing changes unless every part is valid.
    pub fn resize_box(
        &mut self,
        index: usize,
        tag: BoxTag,
        rect: OriginalRect,
    ) -> Result<(), ModelError> {
        let size = CropSize::new(rect.width, rect.height).ok_or(ModelError::InvalidDimensions {
            width: rect.width,
            height: rect.height,
        })?;
        self.entry(index)?.boxes.position(tag)?;

        self.crop_size = size;
        self.set_box_position(index, tag, rect.position.x, rect.position.y)
    }
}

/// Sort by filename and drop duplicate names, keeping the first.
pub(crate) fn normalize_scan(mut scan: Vec<ScannedImage>) -> Vec<ScannedImage> {
    scan.sort_by(|a, b| a.filename.cmp(&b.filename));
    scan.dedup_by(|a, b| a.filename == b.filename);
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Offset;
    use crate::model::PageBoxes;

    fn scan(count: usize) -> Vec<ScannedImage> {
        (0..count)
            .map(|i| ScannedImage::new(format!("page_{:02}.jpg", i), 2000, 1600))
            .collect()
    }

    fn project(count: usize) -> Project {
        Project::new("/scans/book", scan(count))
    }

    #[test]
    fn test_new_project_defaults() {
        let project = project(3);
        assert_eq!(project.len(), 3);
        assert_eq!(project.crop_size(), DEFAULT_CROP_SIZE);
        assert_eq!(project.output_folder(), Path::new("/scans/book/cropped"));
        for entry in project.images() {
            assert_eq!(entry.mode(), PageMode::Single);
            assert_eq!(entry.boxes(), &PageBoxes::Single(BoxPosition::new(600, 200)));
        }
    }

    #[test]
    fn test_new_project_sorts_and_dedups() {
        let project = Project::new(
            "/scans",
            vec![
                ScannedImage::new("b.jpg", 10, 10),
                ScannedImage::new("a.jpg", 10, 10),
                ScannedImage::new("b.jpg", 20, 20),
            ],
        );
        let names: Vec<_> = project.images().iter().map(|e| e.filename()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_set_box_position_roundtrip() {
        let mut project = project(2);
        project.set_box_position(0, BoxTag::Single, -40, 77).unwrap();
        let entry = project.entry(0).unwrap();
        assert_eq!(
            entry.boxes().position(BoxTag::Single).unwrap(),
            BoxPosition::new(-40, 77)
        );
        assert!(entry.position_customized());
        assert!(!entry.mode_customized());
    }

    #[test]
    fn test_set_box_position_propagates_forward_only() {
        let mut project = project(3);
        project.set_box_position(1, BoxTag::Single, 650, 250).unwrap();

        assert_eq!(
            project.entry(0).unwrap().boxes(),
            &PageBoxes::Single(BoxPosition::new(600, 200))
        );
        assert_eq!(
            project.entry(2).unwrap().boxes(),
            &PageBoxes::Single(BoxPosition::new(650, 250))
        );
        assert!(!project.entry(2).unwrap().position_customized());
        assert_eq!(project.placement().single, Offset { dx: 50, dy: 50 });
    }

    #[test]
    fn test_extreme_position_propagates_exactly() {
        let mut project = project(2);
        project.set_box_position(0, BoxTag::Single, i32::MIN, 0).unwrap();
        assert_eq!(
            project.entry(1).unwrap().boxes(),
            &PageBoxes::Single(BoxPosition::new(i32::MIN, 0))
        );

        project.set_box_position(0, BoxTag::Single, i32::MAX, i32::MIN).unwrap();
        assert_eq!(
            project.entry(1).unwrap().boxes(),
            &PageBoxes::Single(BoxPosition::new(i32::MAX, i32::MIN))
        );
    }

    #[test]
    fn test_customized_page_not_overwritten_but_later_pages_are() {
        let mut project = project(4);
        project.set_box_position(2, BoxTag::Single, 10, 10).unwrap();
        project.set_box_position(0, BoxTag::Single, 500, 100).unwrap();

        let positions: Vec<_> = project
            .images()
            .iter()
            .map(|e| e.boxes().position(BoxTag::Single).unwrap())
            .collect();
        assert_eq!(
            positions,
            vec![
                BoxPosition::new(500, 100),
                BoxPosition::new(500, 100),
                BoxPosition::new(10, 10),
                BoxPosition::new(500, 100),
            ]
        );
    }

    #[test]
    fn test_double_mode_vertical_alignment() {
        let mut project = project(2);
        project.set_mode(0, PageMode::Double).unwrap();
        project.set_box_position(0, BoxTag::Right, 1300, 333).unwrap();

        for entry in project.images() {
            let left = entry.boxes().position(BoxTag::Left).unwrap();
            let right = entry.boxes().position(BoxTag::Right).unwrap();
            assert_eq!(left.y, right.y);
        }
        assert_eq!(
            project.entry(1).unwrap().boxes().position(BoxTag::Right).unwrap(),
            BoxPosition::new(1300, 333)
        );
    }

    #[test]
    fn test_mode_scenario_skips_customized_entry() {
        let mut project = project(3);

        project.set_mode(0, PageMode::Double).unwrap();
        assert!(project.images().iter().all(|e| e.mode() == PageMode::Double));
        assert!(project.entry(0).unwrap().mode_customized());
        assert!(!project.entry(1).unwrap().mode_customized());

        project.set_mode(1, PageMode::Single).unwrap();
        assert!(project.entry(1).unwrap().mode_customized());
        assert_eq!(project.entry(2).unwrap().mode(), PageMode::Single);

        project.set_mode(0, PageMode::Double).unwrap();
        assert_eq!(project.entry(1).unwrap().mode(), PageMode::Single);
        assert_eq!(project.entry(2).unwrap().mode(), PageMode::Double);
    }

    #[test]
    fn test_set_mode_derives_boxes_from_single() {
        let mut project = project(1);
        project.set_mode(0, PageMode::Double).unwrap();
        assert_eq!(
            project.entry(0).unwrap().boxes(),
            &PageBoxes::Double {
                left: BoxPosition::new(600, 200),
                right: BoxPosition::new(1400, 200),
            }
        );
    }

    #[test]
    fn test_invalid_crop_size_leaves_project_unchanged() {
        let mut project = project(1);
        let before = project.clone();
        assert_eq!(
            project.set_global_crop_size(0, 100),
            Err(ModelError::InvalidDimensions {
                width: 0,
                height: 100
            })
        );
        assert!(project.set_global_crop_size(100, -5).is_err());
        assert_eq!(project, before);

        project.set_global_crop_size(640, 960).unwrap();
        assert_eq!(
            project.crop_size(),
            CropSize {
                width: 640,
                height: 960
            }
        );
        assert!(project.images().iter().all(|e| !e.position_customized()));
    }

    #[test]
    fn test_errors_do_not_mutate() {
        let mut project = project(2);
        let before = project.clone();

        assert_eq!(
            project.set_mode(2, PageMode::Double),
            Err(ModelError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(
            project.set_box_position(0, BoxTag::Right, 1, 1),
            Err(ModelError::ModeMismatch {
                tag: BoxTag::Right,
                mode: PageMode::Single
            })
        );
        assert!(project.entry(9).is_err());
        assert_eq!(project, before);
    }

    #[test]
    fn test_move_box_by_preview_delta() {
        let mut project = project(2);
        let moved = project
            .move_box_by_preview_delta(0, BoxTag::Single, 10.0, -5.0, 0.25)
            .unwrap();
        assert_eq!(moved, BoxPosition::new(640, 180));
        assert_eq!(
            project.entry(1).unwrap().boxes(),
            &PageBoxes::Single(BoxPosition::new(640, 180))
        );

        let before = project.clone();
        assert!(matches!(
            project.move_box_by_preview_delta(0, BoxTag::Single, 1.0, 1.0, 0.0),
            Err(ModelError::Geometry(_))
        ));
        assert_eq!(project, before);
    }

    #[test]
    fn test_resize_box_sets_global_size() {
        let mut project = project(2);
        project.set_mode(0, PageMode::Double).unwrap();

        let rect = OriginalRect {
            position: BoxPosition::new(50, 60),
            width: 900,
            height: 1300,
        };
        project.resize_box(0, BoxTag::Left, rect).unwrap();

        assert_eq!(
            project.crop_size(),
            CropSize {
                width: 900,
                height: 1300
            }
        );
        let entry = project.entry(0).unwrap();
        assert_eq!(entry.boxes().position(BoxTag::Left).unwrap(), BoxPosition::new(50, 60));
        assert_eq!(entry.boxes().position(BoxTag::Right).unwrap().y, 60);

        let before = project.clone();
        let bad = OriginalRect {
            position: BoxPosition::new(0, 0),
            width: 0,
            height: 10,
        };
        assert!(project.resize_box(0, BoxTag::Left, bad).is_err());
        let wrong_tag = OriginalRect {
            position: BoxPosition::new(0, 0),
            width: 10,
            height: 10,
        };
        assert!(project.resize_box(0, BoxTag::Single, wrong_tag).is_err());
        assert_eq!(project, before);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

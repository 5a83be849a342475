//! Persistence of a project to and from `crop_data.json`.
//!
//! The document is keyed by filename rather than by index, so it stays usable
//! when files are added to or removed from the source folder between sessions:
//!
//! - files found by the scan but missing from the document get default layout
//! - records for files no longer in the folder are dropped
//!
//! A malformed document never blocks loading a folder; the project falls back
//! to a fresh default layout.

mod document;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use document::{BoxesRecord, CropDocument, ImageRecord, SizeRecord};

use crate::config::{DEFAULT_CROP_SIZE, DEFAULT_OUTPUT_SUBDIR, DOCUMENT_FILE_NAME};
use crate::error::PersistError;
use crate::geometry::CropSize;
use crate::imaging::ImageIo;
use crate::model::{ImageEntry, PageBoxes, Project, ScannedImage};
use crate::scan::scan_folder;

/// Build the document for `project`.
pub fn save(project: &Project) -> CropDocument {
    let images = project
        .images()
        .iter()
        .map(|entry| ImageRecord {
            filename: entry.filename().to_string(),
            mode: Some(entry.mode()),
            boxes: Some(match *entry.boxes() {
                PageBoxes::Single(single) => BoxesRecord::Single { single },
                PageBoxes::Double { left, right } => BoxesRecord::Double { left, right },
            }),
            mode_customized: entry.mode_customized(),
            position_customized: entry.position_customized(),
        })
        .collect();

    let crop = project.crop_size();
    CropDocument {
        source_folder: project.source_folder().to_path_buf(),
        output_folder: Some(project.output_folder().to_path_buf()),
        global_crop_size: Some(SizeRecord {
            width: crop.width as i64,
            height: crop.height as i64,
        }),
        images,
        placement: Some(*project.placement()),
        export_settings: Some(*project.export_settings()),
    }
}

/// Hydrate a project from `document` for the files in `scan`.
pub fn load(document: &CropDocument, scan: Vec<ScannedImage>) -> Project {
    load_in(document, &document.source_folder, scan)
}

/// Like [`load`], but rooted at `source_folder` instead of the stored folder.
pub fn load_in(document: &CropDocument, source_folder: &Path, scan: Vec<ScannedImage>) -> Project {
    let mut project = Project::new(source_folder, scan);

    project.crop_size = match document.global_crop_size {
        Some(size) => CropSize::new(size.width, size.height).unwrap_or_else(|| {
            log::warn!(
                "Ignoring invalid stored crop size {}x{}",
                size.width,
                size.height
            );
            DEFAULT_CROP_SIZE
        }),
        None => DEFAULT_CROP_SIZE,
    };
    project.output_folder = document
        .output_folder
        .clone()
        .unwrap_or_else(|| source_folder.join(DEFAULT_OUTPUT_SUBDIR));
    project.placement = document.placement.unwrap_or_default();
    project.export_settings = document.export_settings.unwrap_or_default();

    let mut records: HashMap<&str, &ImageRecord> = HashMap::new();
    for record in &document.images {
        records.entry(record.filename.as_str()).or_insert(record);
    }

    let crop = project.crop_size;
    let mut hydrated = 0;
    for entry in &mut project.images {
        let scanned = ScannedImage::new(
            entry.filename.clone(),
            entry.original_width,
            entry.original_height,
        );
        // Defaults depend on the final crop size, not the one the project started with.
        *entry = ImageEntry::new(&scanned, source_folder, crop);
        if let Some(record) = records.get(entry.filename.as_str()) {
            apply_record(entry, record, crop);
            hydrated += 1;
        }
    }

    let dropped = records.len() - hydrated;
    log::info!(
        "Loaded {} images ({} from saved layout, {} stale records dropped)",
        project.images.len(),
        hydrated,
        dropped
    );
    project
}

fn apply_record(entry: &mut ImageEntry, record: &ImageRecord, crop: CropSize) {
    let stored = record.boxes.map(|boxes| match boxes {
        BoxesRecord::Single { single } => PageBoxes::Single(single),
        BoxesRecord::Double { left, right } => PageBoxes::double(left, right),
    });
    let boxes = stored.unwrap_or(entry.boxes);
    let mode = record.mode.unwrap_or(boxes.mode());

    entry.boxes = boxes.with_mode(mode, crop);
    entry.mode_customized = record.mode_customized;
    entry.position_customized = record.position_customized;
}

/// Location of the project document inside `folder`.
pub fn document_path(folder: &Path) -> PathBuf {
    folder.join(DOCUMENT_FILE_NAME)
}

/// Parse a document from JSON text.
pub fn from_json(json: &str) -> Result<CropDocument, PersistError> {
    serde_json::from_str(json).map_err(|e| PersistError::DocumentParse(e.to_string()))
}

/// Serialize a document to pretty-printed JSON.
pub fn to_json(document: &CropDocument) -> Result<String, PersistError> {
    serde_json::to_string_pretty(document).map_err(|e| PersistError::DocumentParse(e.to_string()))
}

/// Read the document at `path`. A missing file is `Ok(None)`.
pub fn read_document(path: &Path) -> Result<Option<CropDocument>, PersistError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };
    from_json(&json).map(Some)
}

/// Write `document` to `path` as pretty JSON.
pub fn write_document(document: &CropDocument, path: &Path) -> Result<(), PersistError> {
    let json = to_json(document)?;
    std::fs::write(path, json).map_err(|e| PersistError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Scan `folder` and restore its saved layout if there is one.
///
/// An unreadable or malformed document is logged and replaced by defaults.
///
/// # Errors
///
/// Returns `PersistError::Io` only if the folder itself cannot be listed.
pub fn open_project(folder: &Path, io: &impl ImageIo) -> Result<Project, PersistError> {
    let scan = scan_folder(folder, io)?;
    let path = document_path(folder);

    let project = match read_document(&path) {
        Ok(Some(document)) => load_in(&document, folder, scan),
        Ok(None) => Project::new(folder, scan),
        Err(e) => {
            log::warn!("Using default layout for {}: {}", folder.display(), e);
            Project::new(folder, scan)
        }
    };
    Ok(project)
}

/// Write `project` to the document in its source folder. Returns the path written.
pub fn save_project(project: &Project) -> Result<PathBuf, PersistError> {
    let path = document_path(project.source_folder());
    write_document(&save(project), &path)?;
    log::info!("Saved {} images to {}", project.len(), path.display());
    Ok(path)
}

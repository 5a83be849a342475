//! Folder scanning.
//!
//! Lists the supported image files directly inside a folder (no recursion),
//! sorted by filename, and reads each file's dimensions through the image
//! I/O capability. Files whose header cannot be read are skipped.

use std::path::Path;

use crate::config::is_supported_extension;
use crate::error::PersistError;
use crate::imaging::ImageIo;
use crate::model::ScannedImage;

/// Scan `folder` for supported images.
///
/// # Errors
///
/// Returns `PersistError::Io` if the folder itself cannot be listed.
pub fn scan_folder(folder: &Path, io: &impl ImageIo) -> Result<Vec<ScannedImage>, PersistError> {
    let read_dir = std::fs::read_dir(folder).map_err(|e| PersistError::Io {
        path: folder.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut filenames: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(is_supported_extension)
        })
        .collect();
    filenames.sort();

    let mut scanned = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let path = folder.join(&filename);
        match io.dimensions(&path) {
            Ok((width, height)) => scanned.push(ScannedImage::new(filename, width, height)),
            Err(e) => log::warn!("Skipping unreadable image {}: {}", path.display(), e),
        }
    }

    log::info!("Scanned {}: {} images", folder.display(), scanned.len());
    Ok(scanned)
}

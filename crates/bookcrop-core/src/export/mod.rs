//! Export of cropped pages.
//!
//! Every entry is decoded once and each of its boxes is written as its own
//! file into the output folder:
//!
//! - single page: `<stem>.<ext>`
//! - spread: `<stem>_left.<ext>` and `<stem>_right.<ext>`
//!
//! The extension follows the project's [`OutputFormat`]. A failing file is
//! recorded in the [`ExportReport`] and the batch carries on.
//!
//! # Concurrency
//!
//! The exporter only reads the project. Callers that run it off the
//! interaction thread hand it a snapshot (`Project` is `Clone`) and may stop it
//! between files through a shared cancel flag.

mod compose;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub use compose::crop_with_padding;

use crate::config::{ExportSettings, OutputFormat};
use crate::error::{ExportError, ImageIoError};
use crate::imaging::{ImageFormat, ImageIo};
use crate::model::{BoxTag, ImageEntry, Project};

/// A file that could not be exported.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFailure {
    /// Source filename for decode failures, output filename for encode failures.
    pub filename: String,
    pub error: ImageIoError,
}

/// Outcome of an export pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Output filenames written, in export order.
    pub succeeded: Vec<String>,
    pub failed: Vec<ExportFailure>,
    /// True if the pass stopped early on a cancel request.
    pub cancelled: bool,
}

impl ExportReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && !self.cancelled
    }
}

/// Output filename and container for one box of a source file.
pub fn output_file_name(
    source_filename: &str,
    tag: BoxTag,
    format: OutputFormat,
) -> Result<(String, ImageFormat), ImageIoError> {
    let source = Path::new(source_filename);
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_filename);

    let (extension, image_format) = match format {
        OutputFormat::Jpeg => (ImageFormat::Jpeg.extension(), ImageFormat::Jpeg),
        OutputFormat::Png => (ImageFormat::Png.extension(), ImageFormat::Png),
        OutputFormat::MatchSource => {
            let ext = source
                .extension()
                .and_then(|e| e.to_str())
                .ok_or_else(|| ImageIoError::UnsupportedFormat(source_filename.to_string()))?;
            let image_format = ImageFormat::from_extension(ext)
                .ok_or_else(|| ImageIoError::UnsupportedFormat(ext.to_string()))?;
            (ext, image_format)
        }
    };

    let suffix = tag.file_suffix().unwrap_or("");
    Ok((format!("{stem}{suffix}.{extension}"), image_format))
}

/// Export every entry of `project` into its output folder.
///
/// Creates the output folder if needed. Per-file errors are collected in the
/// report. If `cancel` becomes true, no further entries are started.
///
/// # Errors
///
/// Returns `ExportError::OutputFolder` if the output folder cannot be created.
pub fn export_project(
    project: &Project,
    io: &impl ImageIo,
    cancel: Option<&AtomicBool>,
) -> Result<ExportReport, ExportError> {
    let output_folder = project.output_folder();
    std::fs::create_dir_all(output_folder).map_err(|e| ExportError::OutputFolder {
        path: output_folder.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(export_entries(project, output_folder, io, cancel))
}

/// Export into `output_folder`, which must already exist.
pub fn export_entries(
    project: &Project,
    output_folder: &Path,
    io: &impl ImageIo,
    cancel: Option<&AtomicBool>,
) -> ExportReport {
    let mut report = ExportReport::default();
    let mut seen = HashSet::new();
    let settings = project.export_settings();

    for entry in project.images() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            log::info!("Export cancelled after {} files", report.succeeded.len());
            report.cancelled = true;
            break;
        }
        export_entry(
            entry,
            project,
            settings,
            output_folder,
            io,
            &mut seen,
            &mut report,
        );
    }

    log::info!(
        "Exported {} files to {} ({} failed)",
        report.succeeded.len(),
        output_folder.display(),
        report.failed.len()
    );
    report
}

fn export_entry(
    entry: &ImageEntry,
    project: &Project,
    settings: &ExportSettings,
    output_folder: &Path,
    io: &impl ImageIo,
    seen: &mut HashSet<PathBuf>,
    report: &mut ExportReport,
) {
    let decoded = io.decode(entry.path()).and_then(|source| {
        if source.is_consistent() {
            Ok(source)
        } else {
            Err(ImageIoError::Decode {
                path: entry.path().to_path_buf(),
                reason: format!(
                    "{} bytes of pixel data for a {}x{} image",
                    source.pixels.len(),
                    source.width,
                    source.height
                ),
            })
        }
    });
    let source = match decoded {
        Ok(source) => source,
        Err(error) => {
            log::warn!("Skipping {}: {}", entry.filename(), error);
            report.failed.push(ExportFailure {
                filename: entry.filename().to_string(),
                error,
            });
            return;
        }
    };
    let crop = project.crop_size();

    for (tag, position) in entry.boxes().tagged() {
        let (name, format) = match output_file_name(entry.filename(), tag, settings.format) {
            Ok(named) => named,
            Err(error) => {
                report.failed.push(ExportFailure {
                    filename: entry.filename().to_string(),
                    error,
                });
                continue;
            }
        };

        let path = output_folder.join(&name);
        if !seen.insert(path.clone()) {
            log::warn!("{} is written by more than one source file", name);
        }

        let Some(canvas) = crop_with_padding(&source, position, crop) else {
            let error = ImageIoError::Encode {
                path,
                reason: format!("cannot allocate a {}x{} canvas", crop.width, crop.height),
            };
            log::warn!("Failed to write {}: {}", name, error);
            report.failed.push(ExportFailure {
                filename: name,
                error,
            });
            continue;
        };
        match io.encode(&canvas, &path, format, settings.jpeg_quality) {
            Ok(()) => report.succeeded.push(name),
            Err(error) => {
                log::warn!("Failed to write {}: {}", name, error);
                report.failed.push(ExportFailure {
                    filename: name,
                    error,
                });
            }
        }
    }
}

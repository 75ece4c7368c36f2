use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use futures::channel::oneshot;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use serde::Deserialize;

use crate::error::{ExportError, ExportResult};
use crate::util::time;

/// Where and under which name exported drawings are written
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Application-private cache directory, created on first export
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir().join("sketchpad-cache"),
            file_prefix: "DrawingApp_".to_owned(),
        }
    }
}

/// `<prefix><secs>.png`
pub fn export_file_name(prefix: &str, timestamp_secs: u64) -> String {
    format!("{prefix}{timestamp_secs}.png")
}

/// Encodes `image` as PNG with fixed compression settings
pub fn encode_png<W: Write>(image: &RgbaImage, writer: W) -> Result<(), ExportError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ExportError::EmptyImage);
    }
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Writes `image` into the configured directory under a timestamped name.
///
/// Returns the path of the complete file. On failure no file is left behind.
pub fn save_png(image: &RgbaImage, config: &ExportConfig) -> ExportResult {
    if image.width() == 0 || image.height() == 0 {
        return Err(ExportError::EmptyImage);
    }
    fs::create_dir_all(&config.directory)?;
    let path = config
        .directory
        .join(export_file_name(&config.file_prefix, time::timestamp_secs()));
    save_png_to(image, &path)?;
    Ok(path)
}

/// Encodes into `<path>.part` and renames it over `path` once complete.
pub fn save_png_to(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let partial = path.with_extension("png.part");
    let result = write_png_file(image, &partial)
        .and_then(|()| fs::rename(&partial, path).map_err(ExportError::from));

    if result.is_err() && partial.exists() {
        if let Err(err) = fs::remove_file(&partial) {
            log::warn!("Failed to remove partial export {}: {}", partial.display(), err);
        }
    }
    result
}

fn write_png_file(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    encode_png(image, &mut writer)?;
    let file = writer.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// An export running on a worker thread. Reports exactly once.
#[derive(Debug)]
pub struct PendingExport {
    receiver: oneshot::Receiver<ExportResult>,
}

impl PendingExport {
    /// Non-blocking poll for the host's frame loop. `None` while still running.
    pub fn try_take(&mut self) -> Option<ExportResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ExportError::WorkerLost)),
        }
    }

    pub async fn wait(self) -> ExportResult {
        self.receiver
            .await
            .unwrap_or_else(|oneshot::Canceled| Err(ExportError::WorkerLost))
    }
}

/// Hands an owned snapshot to a background thread that writes it to disk.
pub fn spawn_export(image: RgbaImage, config: ExportConfig) -> PendingExport {
    let (sender, receiver) = oneshot::channel();

    let spawned = std::thread::Builder::new()
        .name("export".to_owned())
        .spawn(move || {
            let result = save_png(&image, &config);
            match &result {
                Ok(path) => log::info!("Exported drawing to {}", path.display()),
                Err(err) => log::error!("Export failed: {}", err),
            }
            // The host may have stopped waiting
            let _ = sender.send(result);
        });

    // A failed spawn drops the sender, which the receiver reports as WorkerLost
    if let Err(err) = spawned {
        log::error!("Failed to start export worker: {}", err);
    }

    PendingExport { receiver }
}

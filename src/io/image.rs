//! PNG export of decoded RGBA buffers

use crate::io::error::{ModelError, Result, invalid_parameter};
use image::RgbaImage;
use std::path::Path;

/// Write a row-major RGBA buffer as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The buffer length does not equal `width * height * 4`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_rgba_png(buffer: &[u8], width: usize, height: usize, path: &Path) -> Result<()> {
    let expected = width * height * 4;
    if buffer.len() != expected {
        return Err(invalid_parameter(
            "buffer",
            &buffer.len(),
            &format!("expected {expected} bytes for a {width}x{height} image"),
        ));
    }

    let img = RgbaImage::from_raw(width as u32, height as u32, buffer.to_vec()).ok_or_else(
        || invalid_parameter("buffer", &buffer.len(), &"buffer does not fit image dimensions"),
    )?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ModelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(path).map_err(|e| ModelError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

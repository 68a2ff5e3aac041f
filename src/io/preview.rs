//! ASCII previews of RGBA buffers

use crate::io::configuration::ASCII_RAMP;

/// Render one character per pixel, one line per row
///
/// Brightness is the mean of the RGB channels mapped onto [`ASCII_RAMP`];
/// alpha is ignored. Trailing partial rows of a short buffer are dropped.
pub fn ascii(buffer: &[u8], width: usize, height: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let ramp: Vec<char> = ASCII_RAMP.chars().collect();
    let steps = ramp.len().saturating_sub(1) as f64;

    buffer
        .chunks_exact(width * 4)
        .take(height)
        .map(|row| {
            row.chunks_exact(4)
                .map(|pixel| {
                    let brightness: u32 = pixel.iter().take(3).map(|&c| u32::from(c)).sum();
                    let level = (f64::from(brightness) / (255.0 * 3.0) * steps).floor() as usize;
                    ramp.get(level).copied().unwrap_or('!')
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

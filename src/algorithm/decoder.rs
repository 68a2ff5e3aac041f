use crate::{analysis::catalog::PatternCatalog, spatial::wave::WaveField};

/// Render a wave field as a row-major RGBA buffer
///
/// Every output pixel averages the color each still-possible pattern would
/// paint there, over all windows covering the pixel. Collapsed fields give
/// exact colors; partial or contradicted fields blend. Alpha is always
/// opaque, and pixels with no contributing pattern decode to black.
pub fn to_image(wave: &WaveField, catalog: &PatternCatalog) -> Vec<u8> {
    let (width, height) = (wave.width(), wave.height());
    let window = catalog.window();
    let mut buffer = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            let mut sum = [0u64; 3];
            let mut contributors = 0u64;

            for dy in 0..window {
                for dx in 0..window {
                    let sx = (x + width - dx % width) % width;
                    let sy = (y + height - dy % height) % height;
                    if wave.on_boundary(sx, sy) {
                        continue;
                    }
                    let Some(cell) = wave.possibilities(sx, sy) else {
                        continue;
                    };

                    for pattern in cell.iter() {
                        let color = catalog
                            .patterns()
                            .get(pattern)
                            .and_then(|p| p.get(dx, dy))
                            .and_then(|index| catalog.colors().get(index));
                        if let Some(color) = color {
                            for (channel, value) in sum.iter_mut().zip(color.iter()) {
                                *channel += u64::from(*value);
                            }
                            contributors += 1;
                        }
                    }
                }
            }

            match sum.map(|channel| channel.checked_div(contributors)) {
                [Some(r), Some(g), Some(b)] => {
                    buffer.extend_from_slice(&[r as u8, g as u8, b as u8, 255]);
                }
                _ => buffer.extend_from_slice(&[0, 0, 0, 255]),
            }
        }
    }

    buffer
}

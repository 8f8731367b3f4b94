//! Text sampler
//!
//! Strings are rasterized off-screen with the built-in bitmap font into an
//! 8-bit grayscale image, and every dark pixel becomes a candidate target.

use crate::font::{self, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};
use crate::shape::Density;
use crate::{require_count, require_positive};
use image::{GrayImage, Luma};
use log::warn;
use lumen_core::{LumenError, Result, SampleRng, Vec3};

/// Raster pixels per font pixel
pub const PIXEL_SCALE: u32 = 4;

/// Blank font pixels around the text
const MARGIN: u32 = 1;

/// Luma below this counts as ink
const INK_THRESHOLD: u8 = 128;

/// Positional jitter, in raster pixels, applied to reused pixels
const REUSE_JITTER: f32 = 0.5;

/// Render `text` black-on-white, each font pixel a `pixel_scale` square.
///
/// Characters without a glyph render as blanks.
pub fn rasterize(text: &str, pixel_scale: u32) -> GrayImage {
    let scale = pixel_scale.max(1);
    let chars: Vec<char> = text.chars().collect();
    let columns = if chars.is_empty() {
        0
    } else {
        chars.len() as u32 * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING
    };
    let width = (columns + 2 * MARGIN) * scale;
    let height = (GLYPH_HEIGHT + 2 * MARGIN) * scale;
    let mut image = GrayImage::from_pixel(width, height, Luma([255]));

    for (index, c) in chars.iter().enumerate() {
        let Some(rows) = font::glyph(*c) else {
            warn!("No glyph for {:?}, leaving it blank", c);
            continue;
        };
        let origin_x = MARGIN + index as u32 * (GLYPH_WIDTH + GLYPH_SPACING);
        for (row_index, row) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if !font::is_set(*row, col) {
                    continue;
                }
                let x0 = (origin_x + col) * scale;
                let y0 = (MARGIN + row_index as u32) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        image.put_pixel(x0 + dx, y0 + dy, Luma([0]));
                    }
                }
            }
        }
    }
    image
}

/// Coordinates of inked pixels in row-major order
pub fn dark_pixels(image: &GrayImage) -> Vec<(u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] < INK_THRESHOLD)
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Sample `count` points from the rasterized `text`, centered on the origin
/// with cap height `height`.
///
/// The volume variant extrudes over `depth` when one is given; the surface
/// variant stays at z = 0. With fewer particles than pixels the pixels are
/// taken by even stride; with more, pixels are reused with sub-pixel jitter.
pub fn generate(
    count: usize,
    text: &str,
    height: f32,
    depth: Option<f32>,
    density: Density,
    rng: &mut SampleRng,
) -> Result<Vec<Vec3>> {
    require_count(count)?;
    require_positive("text_height", height)?;
    if let Some(d) = depth {
        require_positive("text_depth", d)?;
    }

    let image = rasterize(text, PIXEL_SCALE);
    let pixels = dark_pixels(&image);
    if pixels.is_empty() {
        return Err(LumenError::EmptyRaster(text.to_string()));
    }

    let unit = height / (GLYPH_HEIGHT * PIXEL_SCALE) as f32;
    let center_x = image.width() as f32 / 2.0;
    let center_y = image.height() as f32 / 2.0;
    let extrude = match density {
        Density::Volume => depth,
        Density::Surface => None,
    };

    let n = pixels.len();
    let points = (0..count)
        .map(|i| {
            let (pixel, spread) = if count <= n {
                (pixels[i * n / count], 0.0)
            } else if i < n {
                (pixels[i], 0.0)
            } else {
                (pixels[i % n], REUSE_JITTER)
            };
            let (px, py) = pixel;
            let x = px as f32 + 0.5 - center_x + rng.jitter(spread);
            let y = center_y - (py as f32 + 0.5) + rng.jitter(spread);
            let z = extrude.map_or(0.0, |d| rng.jitter(d / 2.0));
            Vec3::new(x * unit, y * unit, z)
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_dimensions_follow_text_length() {
        let image = rasterize("HI", 2);
        assert_eq!(image.width(), (2 * 6 - 1 + 2) * 2);
        assert_eq!(image.height(), (7 + 2) * 2);
    }

    #[test]
    fn ink_count_matches_glyph_bits() {
        // 'I' has 3 + 5 + 3 lit font pixels
        let image = rasterize("I", 3);
        assert_eq!(dark_pixels(&image).len(), 11 * 9);
    }

    #[test]
    fn stride_sampling_uses_distinct_pixels() {
        let mut rng = SampleRng::new(40);
        let points = generate(50, "HELLO", 1.2, None, Density::Surface, &mut rng).unwrap();
        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|p| p.z == 0.0));
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(b) > 1e-6);
            }
        }
    }

    #[test]
    fn text_is_centered_with_requested_height() {
        let mut rng = SampleRng::new(41);
        let points = generate(400, "HI", 1.2, None, Density::Surface, &mut rng).unwrap();
        let max_y = points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let min_y = points.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!(max_y <= 0.6 && min_y >= -0.6);
        assert!(max_y - min_y > 1.0);
        let mean_x: f32 = points.iter().map(|p| p.x).sum::<f32>() / points.len() as f32;
        assert!(mean_x.abs() < 0.2);
    }

    #[test]
    fn oversubscribed_pixels_are_jittered() {
        let mut rng = SampleRng::new(42);
        let ink = dark_pixels(&rasterize("I", PIXEL_SCALE)).len();
        let points =
            generate(ink * 3, "I", 1.2, Some(0.3), Density::Volume, &mut rng).unwrap();
        assert_eq!(points.len(), ink * 3);
        assert!(points.iter().all(|p| p.z.abs() <= 0.15 + 1e-6));
        // A reused pixel lands near, but not exactly on, its first use
        let (first, reused) = (points[0], points[ink]);
        let planar = ((first.x - reused.x).powi(2) + (first.y - reused.y).powi(2)).sqrt();
        assert!(planar > 0.0);
        assert!(planar < 0.05);
    }

    #[test]
    fn blank_text_fails() {
        let mut rng = SampleRng::new(43);
        assert!(matches!(
            generate(10, "   ", 1.0, None, Density::Surface, &mut rng),
            Err(LumenError::EmptyRaster(_))
        ));
        assert!(matches!(
            generate(10, "", 1.0, None, Density::Surface, &mut rng),
            Err(LumenError::EmptyRaster(_))
        ));
        assert!(generate(10, "A", 1.0, Some(0.0), Density::Volume, &mut rng).is_err());
    }
}

use image::{Rgb, RgbImage};

use crate::color::{PaletteColor, nearest_color};
use crate::geometry::{BoundingBox, Point};
use crate::shape::Tile;

/// Paints tiles of one source image onto an output canvas.
///
/// Holds the palette and a scratch list of interior pixels reused between
/// tiles.
pub struct TileRenderer<'a> {
    source: &'a RgbImage,
    palette: &'a [PaletteColor],
    interior: Vec<(u32, u32)>,
}

impl<'a> TileRenderer<'a> {
    pub fn new(source: &'a RgbImage, palette: &'a [PaletteColor]) -> Self {
        Self { source, palette, interior: Vec::new() }
    }

    /// Fill the pixels of `output` whose centers fall inside `tile` with the
    /// palette color nearest to their mean source color.
    ///
    /// Returns the color written, or `None` when the tile covers no pixel
    /// center (off-canvas or smaller than a pixel) or the palette is empty.
    pub fn render(&mut self, output: &mut RgbImage, tile: &Tile) -> Option<PaletteColor> {
        let span = BoundingBox::of(tile.vertices())?.pixel_span(self.source.width(), self.source.height())?;
        let mean = accumulate_interior(self.source, span, |p| tile.contains(p), &mut self.interior)?;
        let snapped = nearest_color(mean, self.palette)?;

        let fill = Rgb([snapped.red, snapped.green, snapped.blue]);
        for &(x, y) in &self.interior {
            output.put_pixel(x, y, fill);
        }
        Some(snapped)
    }
}

/// Convenience wrapper rendering a single tile.
pub fn render_tile(
    source: &RgbImage,
    output: &mut RgbImage,
    tile: &Tile,
    palette: &[PaletteColor],
) -> Option<PaletteColor> {
    TileRenderer::new(source, palette).render(output, tile)
}

/// Collect the pixels in the inclusive `span` whose centers satisfy
/// `contains` into `interior` and return their truncated mean color.
///
/// `None` when no pixel qualifies.
pub fn accumulate_interior<F>(
    source: &RgbImage,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    contains: F,
    interior: &mut Vec<(u32, u32)>,
) -> Option<PaletteColor>
where
    F: Fn(Point) -> bool,
{
    interior.clear();
    let (mut sum_r, mut sum_g, mut sum_b) = (0u64, 0u64, 0u64);

    for py in y0..=y1 {
        for px in x0..=x1 {
            if contains(Point::new(px as f64 + 0.5, py as f64 + 0.5)) {
                let Rgb([r, g, b]) = *source.get_pixel(px, py);
                sum_r += r as u64;
                sum_g += g as u64;
                sum_b += b as u64;
                interior.push((px, py));
            }
        }
    }

    let count = interior.len() as u64;
    if count == 0 {
        return None;
    }
    Some(PaletteColor::new(
        (sum_r / count) as u8,
        (sum_g / count) as u8,
        (sum_b / count) as u8,
    ))
}

use image::{ImageBuffer, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::PaletteColor;
use crate::error::{MosaicError, Result};
use crate::grid::TileGrid;
use crate::hue_palette::extract_palette;
use crate::render::TileRenderer;
use crate::shape::{Shape, ShapeParams};

pub const DEFAULT_DOTS: u32 = 3000;
pub const DEFAULT_COLORS: usize = 16;
pub const DEFAULT_ROTATE: i32 = 0;

pub const MIN_COLORS: usize = 5;
pub const MAX_COLORS: usize = 30;
/// Rotations must be a multiple of this many degrees.
pub const ROTATE_STEP: i32 = 15;

/// Parameters of one conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    pub shape: Shape,
    /// Approximate number of tiles covering the image.
    pub dots: u32,
    /// Requested palette size.
    pub colors: usize,
    /// Grid rotation in degrees.
    pub rotate: i32,
    /// Seed for palette clustering; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            dots: DEFAULT_DOTS,
            colors: DEFAULT_COLORS,
            rotate: DEFAULT_ROTATE,
            seed: None,
        }
    }
}

impl ConvertOptions {
    /// Request-level checks. [`convert`] itself trusts its options.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&self.colors) {
            return Err(MosaicError::InvalidOptions(format!(
                "colors must be between {MIN_COLORS} and {MAX_COLORS}, got {}",
                self.colors
            )));
        }
        if self.dots < 1 {
            return Err(MosaicError::InvalidOptions("dots must be at least 1".to_string()));
        }
        if self.rotate % ROTATE_STEP != 0 {
            return Err(MosaicError::InvalidOptions(format!(
                "rotate must be a multiple of {ROTATE_STEP}, got {}",
                self.rotate
            )));
        }
        Ok(())
    }

    /// The clustering rng these options ask for.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Result of a conversion.
#[derive(Clone, Debug)]
pub struct Mosaic {
    pub image: RgbImage,
    pub palette: Vec<PaletteColor>,
    /// Tiles that covered at least one pixel.
    pub tiles_painted: usize,
}

/// Convert `source` into a tile mosaic, seeding clustering from the options.
pub fn convert(source: &RgbImage, options: &ConvertOptions) -> Result<Mosaic> {
    convert_with_rng(source, options, &mut options.rng())
}

/// Convert `source` into a tile mosaic using `rng` for palette clustering.
///
/// The palette is extracted once, then every tile of the (possibly
/// rotated) grid is painted in row-major order onto a white canvas.
pub fn convert_with_rng<R: Rng>(source: &RgbImage, options: &ConvertOptions, rng: &mut R) -> Result<Mosaic> {
    let (width, height) = source.dimensions();

    let palette = extract_palette(source, options.colors, rng);
    if palette.is_empty() {
        return Err(MosaicError::EmptyPalette);
    }

    let params = ShapeParams::compute(width, height, options.dots, options.shape)?;
    let grid = TileGrid::new(width, height, params, options.rotate);
    log::debug!(
        "{} grid over {}x{}: side {:.3}, {} tiles, rotated: {}",
        options.shape,
        width,
        height,
        grid.params().side,
        grid.len(),
        grid.is_rotated()
    );

    let mut image: RgbImage = ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255]));
    let mut renderer = TileRenderer::new(source, &palette);
    let tiles_painted = grid
        .tiles()
        .filter(|tile| renderer.render(&mut image, tile).is_some())
        .count();

    log::info!(
        "converted {}x{} image: {} {} tiles painted, {} palette colors",
        width,
        height,
        tiles_painted,
        options.shape,
        palette.len()
    );

    Ok(Mosaic { image, palette, tiles_painted })
}

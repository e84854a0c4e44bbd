use thiserror::Error;

/// Failures surfaced by a mosaic conversion.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Palette extraction produced no colors (e.g. a zero-area image).
    #[error("palette extraction produced no colors")]
    EmptyPalette,

    /// The tile side derived from the image area and dot count is unusable.
    #[error("degenerate tile geometry: side length {side} is not a positive finite number")]
    DegenerateGeometry { side: f64 },

    /// A request parameter failed adapter-side validation.
    #[error("{0}")]
    InvalidOptions(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MosaicError>;

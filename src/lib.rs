use wasm_bindgen::prelude::*;
use image::{ImageFormat, RgbImage};
use js_sys::{Array, Object, Reflect, Uint8Array};
#[cfg(all(not(target_arch = "wasm32"), feature = "native-bin"))]
use anyhow::Context;

pub mod color;
pub mod converter;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hue_palette;
pub mod kmeans;
pub mod render;
pub mod shape;

pub use color::{Color3f, PaletteColor, nearest_color};
pub use converter::{ConvertOptions, Mosaic, convert, convert_with_rng};
pub use error::{MosaicError, Result};
pub use hue_palette::extract_palette;
pub use shape::Shape;

// ------------------------------------------------------------
// Decode / encode helpers shared by the wasm and native entry points
// ------------------------------------------------------------

/// Decode any supported image format into opaque 8-bit RGB.
pub fn decode_rgb(input: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory(input)?.to_rgb8())
}

/// Encode an RGB buffer as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

fn palette_hex(palette: &[PaletteColor]) -> Vec<String> {
    palette.iter().copied().map(color::to_hex).collect()
}

fn js_error(e: MosaicError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn hex_array(hex: Vec<String>) -> Array {
    let out = Array::new();
    for h in hex {
        out.push(&JsValue::from_str(&h));
    }
    out
}

// ------------------------------------------------------------
// wasm entry points
// ------------------------------------------------------------

/// Convert an encoded image into a tile mosaic.
///
/// Missing parameters take the defaults (`triangle`, 3000 dots, 16 colors,
/// no rotation); an unknown shape name falls back to `triangle`. `colors`
/// must lie in 5..=30, `dots` must be at least 1 and `rotate` a multiple of
/// 15.
///
/// Returns `{ image: Uint8Array, palette: string[] }` where `image` is PNG
/// encoded and `palette` holds `RRGGBB` hex strings.
#[wasm_bindgen]
pub fn convert_image(
    input: Vec<u8>,
    shape: Option<String>,
    dots: Option<u32>,
    colors: Option<u32>,
    rotate: Option<i32>,
    seed: Option<u64>,
) -> std::result::Result<Object, JsValue> {
    let defaults = ConvertOptions::default();
    let options = ConvertOptions {
        shape: Shape::from_request(shape.as_deref()),
        dots: dots.unwrap_or(defaults.dots),
        colors: colors.map_or(defaults.colors, |c| c as usize),
        rotate: rotate.unwrap_or(defaults.rotate),
        seed,
    };
    options.validate().map_err(js_error)?;

    let source = decode_rgb(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image (JPEG/PNG expected): {e}")))?;
    let mosaic = convert(&source, &options).map_err(|e| JsValue::from_str(&format!("Conversion failed: {e}")))?;
    let encoded = encode_png(&mosaic.image).map_err(|e| JsValue::from_str(&format!("PNG encode error: {e}")))?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &Uint8Array::from(encoded.as_slice()))?;
    Reflect::set(&result, &JsValue::from_str("palette"), &hex_array(palette_hex(&mosaic.palette)))?;
    Ok(result)
}

/// Extract the hue-stratified palette of an encoded image as `RRGGBB`
/// hex strings.
#[wasm_bindgen]
pub fn image_palette(input: Vec<u8>, colors: u32, seed: Option<u64>) -> std::result::Result<Array, JsValue> {
    let source = decode_rgb(&input).map_err(js_error)?;
    let options = ConvertOptions { colors: colors as usize, seed, ..Default::default() };
    let palette = extract_palette(&source, options.colors, &mut options.rng());
    Ok(hex_array(palette_hex(&palette)))
}

// ------------------------------------------------------------
// Native entry points
// ------------------------------------------------------------

/// Decode, validate, convert and PNG-encode in one go.
///
/// Returns the PNG bytes and the palette as `RRGGBB` hex strings.
#[cfg(all(not(target_arch = "wasm32"), feature = "native-bin"))]
pub fn convert_bytes(input: &[u8], options: &ConvertOptions) -> anyhow::Result<(Vec<u8>, Vec<String>)> {
    options.validate()?;
    let source = decode_rgb(input).context("decoding input image")?;
    let mosaic = convert(&source, options).context("converting to mosaic")?;
    let png = encode_png(&mosaic.image).context("encoding PNG")?;
    Ok((png, palette_hex(&mosaic.palette)))
}

#[cfg(all(not(target_arch = "wasm32"), feature = "native-bin"))]
pub fn extract_palette_bytes(input: &[u8], colors: usize, seed: Option<u64>) -> anyhow::Result<Vec<String>> {
    let source = decode_rgb(input).context("decoding input image")?;
    let options = ConvertOptions { colors, seed, ..Default::default() };
    let palette = extract_palette(&source, colors, &mut options.rng());
    if palette.is_empty() {
        return Err(MosaicError::EmptyPalette.into());
    }
    Ok(palette_hex(&palette))
}

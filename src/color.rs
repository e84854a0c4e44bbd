use image::Rgb;
use palette::Srgb;

/// Normalised (0.0-1.0) RGB used while clustering.
pub type Color3f = Srgb<f64>;

/// One 8-bit palette entry.
pub type PaletteColor = Srgb<u8>;

/// Number of hue bins palette extraction stratifies pixels into.
pub const HUE_BINS: usize = 12;

const HUE_BIN_WIDTH: f64 = 360.0 / HUE_BINS as f64;

/// Convert an 8-bit image pixel into normalised RGB.
#[inline]
pub fn to_color3f(pixel: &Rgb<u8>) -> Color3f {
    Srgb::new(pixel[0], pixel[1], pixel[2]).into_format::<f64>()
}

/// HSV hue in degrees, `[0, 360)`. Achromatic colors report 0.
///
/// Plain max-channel sector formula on the normalised components.
pub fn hue_degrees(color: Color3f) -> f64 {
    let (r, g, b) = color.into_components();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        let h = (g - b) / delta;
        if g < b { h + 6.0 } else { h }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    sector * 60.0
}

/// Index of the 30 degree hue bin `color` falls into.
#[inline]
pub fn hue_bin(color: Color3f) -> usize {
    (hue_degrees(color) / HUE_BIN_WIDTH) as usize % HUE_BINS
}

/// Squared euclidean distance in normalised RGB space.
#[inline(always)]
pub fn distance_sq_f(a: Color3f, b: Color3f) -> f64 {
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    dr * dr + dg * dg + db * db
}

/// Squared euclidean distance over 8-bit channels.
#[inline(always)]
pub fn distance_sq(a: PaletteColor, b: PaletteColor) -> i32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    dr * dr + dg * dg + db * db
}

/// Palette entry closest to `color`; the earliest entry wins ties.
///
/// Returns `None` for an empty palette.
pub fn nearest_color(color: PaletteColor, palette: &[PaletteColor]) -> Option<PaletteColor> {
    let (first, rest) = palette.split_first()?;
    let mut best = *first;
    let mut best_dist = distance_sq(color, best);
    for &candidate in rest {
        let d = distance_sq(color, candidate);
        if d < best_dist {
            best_dist = d;
            best = candidate;
        }
    }
    Some(best)
}

/// Uppercase `RRGGBB` hex string for a palette entry.
pub fn to_hex(color: PaletteColor) -> String {
    format!("{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

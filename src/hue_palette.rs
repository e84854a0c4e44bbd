use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::{Color3f, HUE_BINS, PaletteColor, hue_bin, to_color3f};
use crate::kmeans::kmeans;

/// Extract up to `requested` representative colors from `source`.
///
/// Pixels are stratified into 12 hue bins, the requested palette size is
/// shared out across bins by pixel mass (largest remainder first), and each
/// bin is clustered on its own. The result is in bin order, cluster order
/// within a bin, with exact duplicates dropped. It is empty only for an
/// empty image or `requested == 0`.
pub fn extract_palette<R: Rng>(source: &RgbImage, requested: usize, rng: &mut R) -> Vec<PaletteColor> {
    let bins = bin_by_hue(source);
    let total: usize = bins.iter().map(Vec::len).sum();
    let sizes: [usize; HUE_BINS] = std::array::from_fn(|i| bins[i].len());
    let quotas = allocate_quotas(&sizes, total, requested);

    // One seed per bin, drawn in bin order, keeps the result independent of
    // how the bins are scheduled.
    let jobs: Vec<(&[Color3f], usize, u64)> = bins
        .iter()
        .zip(quotas)
        .filter(|(bin, quota)| *quota > 0 && !bin.is_empty())
        .map(|(bin, quota)| (bin.as_slice(), quota.min(bin.len()), rng.random::<u64>()))
        .collect();

    #[cfg(feature = "parallel")]
    let clusters: Vec<Vec<Color3f>> = jobs.par_iter().map(cluster_bin).collect();
    #[cfg(not(feature = "parallel"))]
    let clusters: Vec<Vec<Color3f>> = jobs.iter().map(cluster_bin).collect();

    let mut palette: Vec<PaletteColor> = Vec::with_capacity(requested);
    for centroid in clusters.into_iter().flatten() {
        let color: PaletteColor = centroid.into_format::<u8>();
        if !palette.contains(&color) {
            palette.push(color);
        }
    }
    log::debug!(
        "palette: {} colors from {} pixels (requested {}, quotas {:?})",
        palette.len(),
        total,
        requested,
        quotas
    );
    palette
}

fn cluster_bin(&(points, k, seed): &(&[Color3f], usize, u64)) -> Vec<Color3f> {
    let mut rng = StdRng::seed_from_u64(seed);
    kmeans(points, k, &mut rng)
}

/// Normalised pixels of `source` grouped by 30 degree hue bin.
pub fn bin_by_hue(source: &RgbImage) -> [Vec<Color3f>; HUE_BINS] {
    let mut bins: [Vec<Color3f>; HUE_BINS] = Default::default();
    for pixel in source.pixels() {
        let c = to_color3f(pixel);
        bins[hue_bin(c)].push(c);
    }
    bins
}

/// Share `requested` colors across bins proportionally to `sizes`.
///
/// Each non-empty bin gets the floor of its exact share; the colors left
/// over go one apiece to the bins with the largest fractional parts, lower
/// bin index first on equal fractions. Empty bins never receive a color.
pub fn allocate_quotas(sizes: &[usize; HUE_BINS], total: usize, requested: usize) -> [usize; HUE_BINS] {
    let mut quotas = [0usize; HUE_BINS];
    if total == 0 {
        return quotas;
    }

    let mut fractions: Vec<(usize, f64)> = Vec::with_capacity(HUE_BINS);
    let mut assigned = 0usize;
    for (i, &size) in sizes.iter().enumerate() {
        if size == 0 {
            continue;
        }
        let exact = requested as f64 * size as f64 / total as f64;
        let base = exact.floor() as usize;
        quotas[i] = base;
        assigned += base;
        fractions.push((i, exact - base as f64));
    }

    // stable sort: equal fractions keep ascending bin order
    fractions.sort_by(|a, b| b.1.total_cmp(&a.1));
    let remainder = requested.saturating_sub(assigned);
    for &(i, _) in fractions.iter().take(remainder) {
        quotas[i] += 1;
    }
    quotas
}

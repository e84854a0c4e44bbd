use rand::Rng;

use crate::color::{Color3f, distance_sq_f};

/// Upper bound on assignment/update rounds.
pub const MAX_ITERATIONS: usize = 100;

/// Cluster `points` into `k` centroids.
///
/// When there are no more points than clusters the points themselves are
/// returned. Seeding is k-means++ driven by `rng`; the loop stops after
/// [`MAX_ITERATIONS`] rounds or as soon as no point changes cluster.
pub fn kmeans<R: Rng>(points: &[Color3f], k: usize, rng: &mut R) -> Vec<Color3f> {
    if k == 0 {
        return Vec::new();
    }
    if points.len() <= k {
        return points.to_vec();
    }

    let mut centroids = kmeans_plus_plus(points, k, rng);

    // usize::MAX marks "not yet assigned" so the first round always counts as a change.
    let mut labels = vec![usize::MAX; points.len()];
    let mut sums = vec![[0.0f64; 3]; k];
    let mut counts = vec![0usize; k];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (label, &p) in labels.iter_mut().zip(points) {
            let best = nearest_centroid(p, &centroids);
            if *label != best {
                *label = best;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        sums.fill([0.0; 3]);
        counts.fill(0);
        for (&label, p) in labels.iter().zip(points) {
            let s = &mut sums[label];
            s[0] += p.red;
            s[1] += p.green;
            s[2] += p.blue;
            counts[label] += 1;
        }
        for ((centroid, s), &n) in centroids.iter_mut().zip(&sums).zip(&counts) {
            // empty clusters keep their previous position
            if n > 0 {
                let n = n as f64;
                *centroid = Color3f::new(s[0] / n, s[1] / n, s[2] / n);
            }
        }
    }

    centroids
}

/// Index of the centroid closest to `p`; lowest index wins ties.
#[inline]
fn nearest_centroid(p: Color3f, centroids: &[Color3f]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (j, &c) in centroids.iter().enumerate() {
        let d = distance_sq_f(p, c);
        if d < best_d {
            best_d = d;
            best = j;
        }
    }
    best
}

/// k-means++ seeding: first centroid uniform, the rest sampled with
/// probability proportional to squared distance from the closest centroid
/// picked so far.
pub fn kmeans_plus_plus<R: Rng>(points: &[Color3f], k: usize, rng: &mut R) -> Vec<Color3f> {
    let mut centroids = Vec::with_capacity(k);
    if points.is_empty() || k == 0 {
        return centroids;
    }
    centroids.push(points[rng.random_range(0..points.len())]);

    // distance to the nearest chosen centroid, updated incrementally
    let mut nearest: Vec<f64> = points.iter().map(|&p| distance_sq_f(p, centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        let target = rng.random::<f64>() * total;

        let mut chosen = points[points.len() - 1];
        let mut cumulative = 0.0;
        for (&p, &d) in points.iter().zip(&nearest) {
            cumulative += d;
            if cumulative >= target {
                chosen = p;
                break;
            }
        }
        centroids.push(chosen);

        for (slot, &p) in nearest.iter_mut().zip(points) {
            let d = distance_sq_f(p, chosen);
            if d < *slot {
                *slot = d;
            }
        }
    }
    centroids
}

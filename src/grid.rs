use crate::geometry::{Point, Rotation};
use crate::shape::{ShapeParams, Tile};

/// The lattice of tiles covering one canvas, optionally rotated about the
/// canvas center. Tiles are produced lazily, row by row.
#[derive(Clone, Debug)]
pub struct TileGrid {
    params: ShapeParams,
    origin: Point,
    rows: (i64, i64),
    cols: (i64, i64),
    rotation: Option<Rotation>,
}

impl TileGrid {
    /// Lay out `params` over a `width` x `height` canvas.
    ///
    /// `rotate_degrees` is taken modulo 360. A non-zero angle grows the laid
    /// out area to the canvas center plus or minus the diagonal on both axes
    /// so the rotated lattice still reaches every corner.
    pub fn new(width: u32, height: u32, params: ShapeParams, rotate_degrees: i32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let center = Point::new(w / 2.0, h / 2.0);
        let degrees = rotate_degrees.rem_euclid(360);

        let (origin, extent_w, extent_h, rotation) = if degrees != 0 {
            let diag = w.hypot(h);
            (
                Point::new(center.x - diag, center.y - diag),
                2.0 * diag,
                2.0 * diag,
                Some(Rotation::new(center, degrees as f64)),
            )
        } else {
            (Point::new(0.0, 0.0), w, h, None)
        };

        let (rows, cols) = params.index_bounds(extent_w, extent_h);
        Self { params, origin, rows, cols, rotation }
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation.is_some()
    }

    /// Number of tiles [`tiles`](Self::tiles) yields.
    pub fn len(&self) -> usize {
        let span = |(lo, hi): (i64, i64)| (hi - lo + 1).max(0) as usize;
        span(self.rows) * span(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every tile in row-major order, already rotated when requested.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let (r0, r1) = self.rows;
        let (c0, c1) = self.cols;
        (r0..=r1).flat_map(move |row| {
            (c0..=c1).map(move |col| {
                let tile = self.params.build_tile(row, col, self.origin);
                match &self.rotation {
                    Some(rotation) => tile.rotated(rotation),
                    None => tile,
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn unrotated_grid_starts_at_origin() {
        let params = ShapeParams::compute(40, 20, 8, Shape::Square).unwrap();
        let grid = TileGrid::new(40, 20, params, 0);
        assert!(!grid.is_rotated());
        assert!(!grid.is_empty());
        assert_eq!(grid.params().side, params.side);
        let first = grid.tiles().next().unwrap();
        assert_eq!(first.vertices()[0], Point::new(0.0, 0.0));
        assert_eq!(grid.tiles().count(), grid.len());
    }

    #[test]
    fn full_turns_are_not_rotations() {
        let params = ShapeParams::compute(40, 20, 8, Shape::Hexagon).unwrap();
        assert!(!TileGrid::new(40, 20, params, 360).is_rotated());
        assert!(!TileGrid::new(40, 20, params, -720).is_rotated());
        assert!(TileGrid::new(40, 20, params, 15).is_rotated());
    }

    #[test]
    fn rotated_lattice_stays_within_expanded_canvas() {
        let (w, h) = (60u32, 30u32);
        let diag = (w as f64).hypot(h as f64);
        let center = Point::new(w as f64 / 2.0, h as f64 / 2.0);
        for shape in [Shape::Triangle, Shape::Square, Shape::Hexagon] {
            let params = ShapeParams::compute(w, h, 40, shape).unwrap();
            let grid = TileGrid::new(w, h, params, 45);
            // boundary rows and columns reach a few sides past the extent
            let slack = params.side * 6.0;

            for row in grid.rows.0..=grid.rows.1 {
                for col in grid.cols.0..=grid.cols.1 {
                    for v in params.build_tile(row, col, grid.origin).vertices() {
                        assert!(v.x >= -diag - slack && v.x <= w as f64 + diag + slack, "{shape}: {v:?}");
                        assert!(v.y >= -diag - slack && v.y <= h as f64 + diag + slack, "{shape}: {v:?}");
                    }
                }
            }

            let reach = std::f64::consts::SQRT_2 * (diag + slack);
            let mut count = 0;
            for tile in grid.tiles() {
                count += 1;
                assert_eq!(tile.shape(), shape);
                for v in tile.vertices() {
                    assert!((v.x - center.x).hypot(v.y - center.y) <= reach + 1e-9, "{shape}: {v:?}");
                }
            }
            assert_eq!(count, grid.len());
        }
    }

    #[test]
    fn rotated_grid_covers_every_corner() {
        let (w, h) = (50u32, 20u32);
        let params = ShapeParams::compute(w, h, 30, Shape::Square).unwrap();
        let grid = TileGrid::new(w, h, params, 30);
        for corner in [(0.5, 0.5), (49.5, 0.5), (0.5, 19.5), (49.5, 19.5)] {
            let p = Point::new(corner.0, corner.1);
            assert!(grid.tiles().any(|t| t.contains(p)), "{corner:?} uncovered");
        }
    }
}

//! Plane geometry shared by the tile builders and the renderer.

/// A point on the canvas, in pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rotation about a fixed center, with the trig evaluated once.
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    center: Point,
    cos: f64,
    sin: f64,
}

impl Rotation {
    pub fn new(center: Point, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self { center, cos: rad.cos(), sin: rad.sin() }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        Point::new(
            self.center.x + dx * self.cos - dy * self.sin,
            self.center.y + dx * self.sin + dy * self.cos,
        )
    }
}

/// Rotate `p` about `center` by `degrees`.
pub fn rotate_point(p: Point, center: Point, degrees: f64) -> Point {
    Rotation::new(center, degrees).apply(p)
}

/// Twice the signed area of (p, a, b).
#[inline(always)]
fn cross(p: Point, a: Point, b: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Sign-consistency test. Points on an edge count as inside.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(p, a, b);
    let d2 = cross(p, b, c);
    let d3 = cross(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Even-odd ray casting towards +x.
///
/// Uses the half-open edge rule: a point on a left or top edge is inside,
/// one on a right or bottom edge is not, so two polygons sharing an edge
/// never both claim (or both drop) a point on it.
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounds of a vertex list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn of(vertices: &[Point]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let mut bb = BoundingBox { min: *first, max: *first };
        for v in rest {
            bb.min.x = bb.min.x.min(v.x);
            bb.min.y = bb.min.y.min(v.y);
            bb.max.x = bb.max.x.max(v.x);
            bb.max.y = bb.max.y.max(v.y);
        }
        Some(bb)
    }

    /// Inclusive pixel range `(x0, y0, x1, y1)` covered by the box, clamped
    /// to a `width` x `height` canvas. `None` when the box misses the canvas.
    pub fn pixel_span(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        if width == 0 || height == 0 {
            return None;
        }
        let (w, h) = (width as f64, height as f64);
        if self.max.x < 0.0 || self.max.y < 0.0 || self.min.x > w || self.min.y > h {
            return None;
        }
        let clamp = |v: f64, hi: u32| -> u32 { v.max(0.0).min(hi as f64) as u32 };
        Some((
            clamp(self.min.x.floor(), width - 1),
            clamp(self.min.y.floor(), height - 1),
            clamp(self.max.x.ceil(), width - 1),
            clamp(self.max.y.ceil(), height - 1),
        ))
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::{MosaicError, Result};
use crate::geometry::{Point, Rotation, point_in_polygon, point_in_triangle};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Tile shape of the mosaic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Equilateral triangles, alternating up and down.
    #[default]
    Triangle,
    /// Axis-aligned squares.
    Square,
    /// Pointy-top regular hexagons in offset rows.
    Hexagon,
}

impl Shape {
    pub const fn name(self) -> &'static str {
        match self {
            Shape::Triangle => "triangle",
            Shape::Square => "square",
            Shape::Hexagon => "hexagon",
        }
    }

    /// Parse a request value the lenient way: empty or unknown names fall
    /// back to the default shape.
    pub fn from_request(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub const fn vertex_count(self) -> usize {
        match self {
            Shape::Triangle => 3,
            Shape::Square => 4,
            Shape::Hexagon => 6,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangle" => Ok(Shape::Triangle),
            "square" => Ok(Shape::Square),
            "hexagon" => Ok(Shape::Hexagon),
            other => Err(MosaicError::InvalidOptions(format!("unknown shape `{other}`"))),
        }
    }
}

/// One mosaic cell: up to six vertices plus the shape that decides which
/// containment test applies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    shape: Shape,
    points: [Point; 6],
}

impl Tile {
    fn new(shape: Shape, vertices: &[Point]) -> Self {
        let mut points = [Point::new(0.0, 0.0); 6];
        points[..vertices.len()].copy_from_slice(vertices);
        Self { shape, points }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn vertices(&self) -> &[Point] {
        &self.points[..self.shape.vertex_count()]
    }

    /// Triangles include their boundary; squares and hexagons use the
    /// half-open ray casting rule.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        match self.shape {
            Shape::Triangle => point_in_triangle(p, self.points[0], self.points[1], self.points[2]),
            Shape::Square | Shape::Hexagon => point_in_polygon(p, self.vertices()),
        }
    }

    pub fn rotated(mut self, rotation: &Rotation) -> Self {
        let n = self.shape.vertex_count();
        for v in &mut self.points[..n] {
            *v = rotation.apply(*v);
        }
        self
    }
}

/// Side length and lattice steps for one shape at one tile density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    pub shape: Shape,
    pub side: f64,
    /// Distance between neighbouring column origins.
    pub col_step: f64,
    /// Distance between neighbouring row origins.
    pub row_step: f64,
}

impl ShapeParams {
    /// Derive the tile size so that roughly `dots` tiles cover a
    /// `width` x `height` canvas.
    pub fn compute(width: u32, height: u32, dots: u32, shape: Shape) -> Result<Self> {
        let area = width as f64 * height as f64 / dots as f64;
        let side = match shape {
            Shape::Triangle => (4.0 * area / SQRT_3).sqrt(),
            Shape::Square => area.sqrt(),
            Shape::Hexagon => (2.0 * area / (3.0 * SQRT_3)).sqrt(),
        };
        if !side.is_finite() || side <= 0.0 {
            return Err(MosaicError::DegenerateGeometry { side });
        }

        let (col_step, row_step) = match shape {
            Shape::Triangle => (side / 2.0, side * SQRT_3 / 2.0),
            Shape::Square => (side, side),
            Shape::Hexagon => (SQRT_3 * side, 1.5 * side),
        };
        Ok(Self { shape, side, col_step, row_step })
    }

    /// First and last (inclusive) row and column indices needed to cover an
    /// area of `extent_w` x `extent_h` laid out from the grid origin.
    pub fn index_bounds(&self, extent_w: f64, extent_h: f64) -> ((i64, i64), (i64, i64)) {
        let rows_needed = (extent_h / self.row_step).ceil() as i64;
        let cols_needed = (extent_w / self.col_step).ceil() as i64;
        match self.shape {
            Shape::Square => ((0, rows_needed + 1), (0, cols_needed + 1)),
            Shape::Triangle | Shape::Hexagon => ((-1, rows_needed + 1), (-1, cols_needed + 1)),
        }
    }

    /// Tile at lattice position (`row`, `col`) relative to `origin`.
    ///
    /// Square and triangle corners are computed from integer multiples of
    /// the steps, so neighbours share bit-identical edges.
    pub fn build_tile(&self, row: i64, col: i64, origin: Point) -> Tile {
        let x_at = |c: i64| origin.x + c as f64 * self.col_step;
        let y_at = |r: i64| origin.y + r as f64 * self.row_step;

        match self.shape {
            Shape::Triangle => {
                let (left, mid, right) = (x_at(col), x_at(col + 1), x_at(col + 2));
                let (top, bottom) = (y_at(row), y_at(row + 1));
                if (row + col).rem_euclid(2) == 0 {
                    // pointing up
                    Tile::new(
                        Shape::Triangle,
                        &[Point::new(left, bottom), Point::new(right, bottom), Point::new(mid, top)],
                    )
                } else {
                    Tile::new(
                        Shape::Triangle,
                        &[Point::new(left, top), Point::new(right, top), Point::new(mid, bottom)],
                    )
                }
            }
            Shape::Square => {
                let (x0, x1) = (x_at(col), x_at(col + 1));
                let (y0, y1) = (y_at(row), y_at(row + 1));
                Tile::new(
                    Shape::Square,
                    &[Point::new(x0, y0), Point::new(x1, y0), Point::new(x1, y1), Point::new(x0, y1)],
                )
            }
            Shape::Hexagon => {
                let mut cx = x_at(col);
                if row.rem_euclid(2) == 1 {
                    cx += self.col_step / 2.0;
                }
                let cy = y_at(row);
                let vertices: [Point; 6] = std::array::from_fn(|i| {
                    let angle = (60.0 * i as f64 - 30.0).to_radians();
                    Point::new(cx + self.side * angle.cos(), cy + self.side * angle.sin())
                });
                Tile::new(Shape::Hexagon, &vertices)
            }
        }
    }
}

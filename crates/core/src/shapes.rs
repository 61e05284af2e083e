//! Shape Catalog - piece definitions and rotation
//!
//! Seven immutable shapes, each four cell offsets at rotation 0 plus a color.
//! Rotations are never stored: [`rotate`] recomputes them from rotation 0 on
//! every call, one `(x, y) -> (y, -x)` quarter turn per step about the origin.

use crate::types::{Rgb, ShapeKind};

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i32, i32);

/// The four cell offsets of a piece
pub type ShapeCells = [CellOffset; 4];

/// An entry of the Shape Catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub cells: ShapeCells,
    pub color: Rgb,
}

impl Shape {
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Catalog in index order; `SHAPES[kind.index()].kind == kind`.
pub const SHAPES: [Shape; 7] = [
    Shape {
        kind: ShapeKind::I,
        cells: [(0, 0), (1, 0), (2, 0), (3, 0)],
        color: Rgb::new(0, 255, 255),
    },
    Shape {
        kind: ShapeKind::O,
        cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
        color: Rgb::new(255, 255, 0),
    },
    Shape {
        kind: ShapeKind::T,
        cells: [(1, 0), (0, 1), (1, 1), (2, 1)],
        color: Rgb::new(128, 0, 128),
    },
    Shape {
        kind: ShapeKind::L,
        cells: [(2, 0), (0, 1), (1, 1), (2, 1)],
        color: Rgb::new(255, 165, 0),
    },
    Shape {
        kind: ShapeKind::J,
        cells: [(0, 0), (0, 1), (1, 1), (2, 1)],
        color: Rgb::new(0, 0, 255),
    },
    Shape {
        kind: ShapeKind::S,
        cells: [(1, 0), (2, 0), (0, 1), (1, 1)],
        color: Rgb::new(0, 255, 0),
    },
    Shape {
        kind: ShapeKind::Z,
        cells: [(0, 0), (1, 0), (1, 1), (2, 1)],
        color: Rgb::new(255, 0, 0),
    },
];

/// Look up a shape by catalog index
pub fn shape(index: usize) -> Option<&'static Shape> {
    SHAPES.get(index)
}

pub fn shape_of(kind: ShapeKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

/// Rotate offsets by `rotation` quarter turns (taken modulo 4).
pub fn rotate(cells: &ShapeCells, rotation: u8) -> ShapeCells {
    let mut out = *cells;
    for _ in 0..rotation % 4 {
        for cell in out.iter_mut() {
            let (x, y) = *cell;
            *cell = (y, -x);
        }
    }
    out
}

/// Offsets of `kind` at the given rotation
pub fn rotated_cells(kind: ShapeKind, rotation: u8) -> ShapeCells {
    rotate(&shape_of(kind).cells, rotation)
}

/// Absolute board cells of `kind` placed at (x, y) with the given rotation
pub fn placed_cells(kind: ShapeKind, rotation: u8, x: i32, y: i32) -> ShapeCells {
    let mut cells = rotated_cells(kind, rotation);
    for cell in cells.iter_mut() {
        cell.0 += x;
        cell.1 += y;
    }
    cells
}

/// Marker color for a settled board cell
pub fn marker_color(marker: u8) -> Option<Rgb> {
    ShapeKind::from_marker(marker).map(|kind| shape_of(kind).color)
}

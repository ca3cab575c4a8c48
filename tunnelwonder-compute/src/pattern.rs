//! Hashed Truchet tile distance field.
//!
//! The plane is cut into unit cells centered on integer coordinates. Every
//! cell draws quarter arcs around its corners, so arcs from neighbouring cells
//! meet at the shared edge and read as continuous curves. A per-cell hash adds
//! zero, one or two diagonal connectors to break up the repetition.

use crate::hash::hash2;
use glam::Vec2;
use std::f32::consts::FRAC_1_SQRT_2;

/// Unit diagonals at +45° and -45°.
const DIAGONAL_A: Vec2 = Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
const DIAGONAL_B: Vec2 = Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);

/// Which primitives a cell draws besides its arcs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileVariant {
    /// Arcs and both diagonals.
    Full,
    /// Arcs and the +45° diagonal.
    DiagonalA,
    /// Arcs and the -45° diagonal.
    DiagonalB,
    /// Arcs only.
    ArcsOnly,
}

impl TileVariant {
    /// Map a cell hash in `[0, 1)` to the tile drawn in that cell.
    pub fn from_hash(h: f32) -> Self {
        if h > 0.85 {
            Self::Full
        } else if h > 0.5 {
            Self::DiagonalA
        } else if h > 0.15 {
            Self::DiagonalB
        } else {
            Self::ArcsOnly
        }
    }
}

/// Result of evaluating the pattern at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternSample {
    /// Unsigned distance to the nearest drawn primitive.
    pub distance: f32,
    /// Signed distance to the arc circle, negative inside it.
    pub circle_distance: f32,
    /// Whether the point lies inside the arc circle.
    pub inside: bool,
    /// Integer coordinates of the cell the point fell into.
    pub cell: Vec2,
    pub variant: TileVariant,
}

/// Split a point into its cell index and the offset from the cell center,
/// in `[-0.5, 0.5)`.
pub fn cell_of(point: Vec2) -> (Vec2, Vec2) {
    let shifted = point + 0.5;
    let cell = shifted.floor();
    (cell, shifted - cell - 0.5)
}

/// Evaluate the Truchet field with arc radius `radius` at `point`.
pub fn evaluate(radius: f32, point: Vec2) -> PatternSample {
    let (cell, local) = cell_of(point);
    let variant = TileVariant::from_hash(hash2(cell));

    // Distance to the nearest cell corner: arcs are centered there
    let corner_distance = (local.abs() - 0.5).length();
    let arc = (corner_distance - radius).abs();

    let along_a = local.dot(DIAGONAL_A);
    let along_b = local.dot(DIAGONAL_B);

    // Connectors stop where the other diagonal leaves the cell
    let diagonal_a = if along_b.abs() > FRAC_1_SQRT_2 {
        corner_distance
    } else {
        along_a.abs()
    };
    let diagonal_b = if along_a.abs() > FRAC_1_SQRT_2 {
        corner_distance
    } else {
        along_b.abs()
    };

    let distance = match variant {
        TileVariant::Full => arc.min(diagonal_a).min(diagonal_b),
        TileVariant::DiagonalA => arc.min(diagonal_a),
        TileVariant::DiagonalB => arc.min(diagonal_b),
        TileVariant::ArcsOnly => arc,
    };

    let circle_distance = corner_distance - radius;

    PatternSample {
        distance,
        circle_distance,
        inside: circle_distance < 0.0,
        cell,
        variant,
    }
}

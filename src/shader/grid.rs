//! Grid and cell-based helpers.

use glam::Vec2;

/// Integer cell containing `p` for cells of `cell_size`, as floats.
///
/// Kept as floats so the result can feed the float hashes directly.
#[inline]
pub fn grid_cell(p: Vec2, cell_size: f32) -> Vec2 {
    (p / cell_size).floor()
}

/// The cell containing `p` and its eight neighbours, as offsets.
pub const NEIGHBOURS: [Vec2; 9] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

//! Visitation history used to decay the potential field.

use crate::core::GridCoord;

/// Accumulated visit score per grid cell.
///
/// Scores only ever grow. Each deposit spreads over a square neighborhood
/// weighted by `1 / (manhattan offset + 1)`, so the deposited cell gets the
/// full amount and its ring neighbors progressively less.
#[derive(Clone, Debug)]
pub struct VisitField {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl VisitField {
    /// Create an all-zero field
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            values: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Field width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        (coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// Score at a cell (0 outside the field)
    #[inline]
    pub fn value(&self, coord: GridCoord) -> f32 {
        self.index(coord).map_or(0.0, |i| self.values[i])
    }

    /// Add `amount / (manhattan + 1)` to every cell within `radius` of `center`
    pub fn deposit(&mut self, center: GridCoord, amount: f32, radius: usize) {
        let r = radius as i32;
        for dx in -r..=r {
            for dy in -r..=r {
                let coord = center.offset(dx, dy);
                if let Some(i) = self.index(coord) {
                    let weight = 1.0 / (dx.abs() + dy.abs() + 1) as f32;
                    self.values[i] += amount * weight;
                }
            }
        }
    }

    /// Sum over all cells
    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }
}

//! Tiles domain: grid queries and the ordered sequence of occupiable tile slots.
//!
//! The slot order (y outer, x inner) is what template pixels are aligned to,
//! so it must never come from an unordered collection.

#[cfg(test)]
mod tests;

use bevy::prelude::*;

/// Half-open cell range: `min` inclusive, `max` exclusive on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min: IVec3,
    pub max: IVec3,
}

impl CellBounds {
    pub fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> IVec3 {
        (self.max - self.min).max(IVec3::ZERO)
    }

    pub fn contains(&self, cell: IVec3) -> bool {
        cell.cmpge(self.min).all() && cell.cmplt(self.max).all()
    }

    /// Every cell in bounds: z outer, then y, x innermost.
    pub fn cells(&self) -> impl Iterator<Item = IVec3> {
        let (min, max) = (self.min, self.max);
        (min.z..max.z).flat_map(move |z| {
            (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| IVec3::new(x, y, z)))
        })
    }
}

/// What tile detection needs from a grid.
pub trait GridQuery {
    fn cell_bounds(&self) -> CellBounds;
    fn has_tile(&self, cell: IVec3) -> bool;
    /// World position of the cell's minimum corner.
    fn cell_to_world(&self, cell: IVec3) -> Vec3;
    fn cell_size(&self) -> Vec2;
}

/// Occupancy grid for one room.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    bounds: CellBounds,
    occupied: Vec<bool>,
    cell_size: f32,
    origin: Vec3,
}

impl TileGrid {
    /// Empty grid covering `bounds`. `origin` is the world position of cell (0, 0, 0).
    pub fn new(bounds: CellBounds, cell_size: f32, origin: Vec3) -> Self {
        let size = bounds.size();
        Self {
            bounds,
            occupied: vec![false; (size.x * size.y * size.z) as usize],
            cell_size,
            origin,
        }
    }

    /// Build from occupancy rows, top row first; `#` marks an occupied cell.
    pub fn from_rows(rows: &[String], cell_size: f32, origin: Vec3) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
        let height = rows.len() as i32;
        let mut grid = Self::new(
            CellBounds::new(IVec3::ZERO, IVec3::new(width, height, 1)),
            cell_size,
            origin,
        );

        for (row_index, row) in rows.iter().enumerate() {
            let y = height - 1 - row_index as i32;
            for (x, symbol) in row.chars().enumerate() {
                if symbol == '#' {
                    grid.set(IVec3::new(x as i32, y, 0), true);
                }
            }
        }
        grid
    }

    fn index(&self, cell: IVec3) -> Option<usize> {
        if !self.bounds.contains(cell) {
            return None;
        }
        let size = self.bounds.size();
        let local = cell - self.bounds.min;
        Some((local.z * size.y * size.x + local.y * size.x + local.x) as usize)
    }

    /// Cells outside the bounds are ignored.
    pub fn set(&mut self, cell: IVec3, occupied: bool) {
        if let Some(index) = self.index(cell) {
            self.occupied[index] = occupied;
        }
    }

    /// World-space size of the whole grid on x/y.
    pub fn world_size(&self) -> Vec2 {
        self.bounds.size().truncate().as_vec2() * self.cell_size
    }
}

impl GridQuery for TileGrid {
    fn cell_bounds(&self) -> CellBounds {
        self.bounds
    }

    fn has_tile(&self, cell: IVec3) -> bool {
        self.index(cell)
            .and_then(|index| self.occupied.get(index).copied())
            .unwrap_or(false)
    }

    fn cell_to_world(&self, cell: IVec3) -> Vec3 {
        self.origin + cell.as_vec3() * self.cell_size
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::splat(self.cell_size)
    }
}

/// One occupiable cell's world position plus availability flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSlot {
    pub position: Vec3,
    pub available: bool,
}

/// Ordered tile slots of one room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileSequence(Vec<TileSlot>);

impl TileSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TileSlot> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileSlot> {
        self.0.iter()
    }

    pub fn available_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.available).count()
    }

    /// Returns false when `index` is out of range.
    pub fn mark_unavailable(&mut self, index: usize) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                slot.available = false;
                true
            }
            None => false,
        }
    }
}

impl FromIterator<Vec3> for TileSequence {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|position| TileSlot {
                    position,
                    available: true,
                })
                .collect(),
        )
    }
}

/// Collect every occupied cell in bounds, in row-major order, as a world-space slot
/// centered in its cell.
pub fn detect_tiles(grid: &impl GridQuery) -> TileSequence {
    let half_cell = (grid.cell_size() * 0.5).extend(0.0);
    let bounds = grid.cell_bounds();
    let sequence: TileSequence = bounds
        .cells()
        .filter(|cell| grid.has_tile(*cell))
        .map(|cell| grid.cell_to_world(cell) + half_cell)
        .collect();

    debug!(
        "[TILES] {} occupied of {} cells",
        sequence.len(),
        bounds.size().element_product()
    );
    sequence
}

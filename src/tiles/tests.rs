//! Tiles domain: tests for bounds iteration and tile detection.

use bevy::prelude::*;

use super::*;

fn rows(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Grid double answering from a fixed list of cells.
struct ListGrid {
    bounds: CellBounds,
    cells: Vec<IVec3>,
}

impl GridQuery for ListGrid {
    fn cell_bounds(&self) -> CellBounds {
        self.bounds
    }

    fn has_tile(&self, cell: IVec3) -> bool {
        self.cells.contains(&cell)
    }

    fn cell_to_world(&self, cell: IVec3) -> Vec3 {
        cell.as_vec3()
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::ONE
    }
}

#[test]
fn test_cell_bounds_iterate_x_innermost() {
    let bounds = CellBounds::new(IVec3::ZERO, IVec3::new(2, 2, 1));
    let cells: Vec<_> = bounds.cells().collect();
    assert_eq!(
        cells,
        vec![
            IVec3::new(0, 0, 0),
            IVec3::new(1, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(1, 1, 0),
        ]
    );
}

#[test]
fn test_cell_bounds_empty_when_max_not_above_min() {
    let bounds = CellBounds::new(IVec3::new(2, 0, 0), IVec3::new(1, 3, 1));
    assert_eq!(bounds.cells().count(), 0);
    assert_eq!(bounds.size(), IVec3::new(0, 3, 1));
}

#[test]
fn test_detect_tiles_keeps_only_occupied_cells_in_row_major_order() {
    let grid = ListGrid {
        bounds: CellBounds::new(IVec3::ZERO, IVec3::new(3, 2, 1)),
        // Deliberately listed out of order.
        cells: vec![IVec3::new(0, 1, 0), IVec3::new(2, 0, 0), IVec3::new(1, 0, 0)],
    };

    let tiles = detect_tiles(&grid);
    let positions: Vec<_> = tiles.iter().map(|slot| slot.position).collect();
    assert_eq!(
        positions,
        vec![
            Vec3::new(1.5, 0.5, 0.0),
            Vec3::new(2.5, 0.5, 0.0),
            Vec3::new(0.5, 1.5, 0.0),
        ]
    );
    assert!(tiles.iter().all(|slot| slot.available));
}

#[test]
fn test_detect_tiles_handles_negative_bounds() {
    let grid = ListGrid {
        bounds: CellBounds::new(IVec3::new(-2, -1, 0), IVec3::new(0, 1, 1)),
        cells: vec![IVec3::new(-2, -1, 0), IVec3::new(-1, 0, 0)],
    };

    let tiles = detect_tiles(&grid);
    assert_eq!(tiles.len(), 2);
    assert_eq!(tiles.get(0).unwrap().position, Vec3::new(-1.5, -0.5, 0.0));
    assert_eq!(tiles.get(1).unwrap().position, Vec3::new(-0.5, 0.5, 0.0));
}

#[test]
fn test_detect_tiles_on_empty_grid() {
    let grid = TileGrid::from_rows(&rows(&["...", "..."]), 16.0, Vec3::ZERO);
    assert!(detect_tiles(&grid).is_empty());
}

#[test]
fn test_tile_grid_from_rows_puts_first_row_on_top() {
    let grid = TileGrid::from_rows(&rows(&["#.", ".#"]), 10.0, Vec3::new(100.0, 200.0, 0.0));

    assert!(grid.has_tile(IVec3::new(0, 1, 0)));
    assert!(grid.has_tile(IVec3::new(1, 0, 0)));
    assert!(!grid.has_tile(IVec3::new(0, 0, 0)));
    assert!(!grid.has_tile(IVec3::new(5, 5, 0)));
    assert_eq!(grid.world_size(), Vec2::new(20.0, 20.0));

    let tiles = detect_tiles(&grid);
    assert_eq!(tiles.len(), 2);
    // Bottom row first, centered in the cell.
    assert_eq!(tiles.get(0).unwrap().position, Vec3::new(115.0, 205.0, 0.0));
    assert_eq!(tiles.get(1).unwrap().position, Vec3::new(105.0, 215.0, 0.0));
}

#[test]
fn test_tile_grid_set_ignores_out_of_bounds_cells() {
    let mut grid = TileGrid::new(
        CellBounds::new(IVec3::new(-1, -1, 0), IVec3::new(1, 1, 1)),
        1.0,
        Vec3::ZERO,
    );
    grid.set(IVec3::new(-1, -1, 0), true);
    grid.set(IVec3::new(4, 4, 0), true);

    assert!(grid.has_tile(IVec3::new(-1, -1, 0)));
    assert_eq!(detect_tiles(&grid).len(), 1);
}

#[test]
fn test_tile_sequence_marks_slots_unavailable() {
    let mut tiles: TileSequence = [Vec3::ZERO, Vec3::X].into_iter().collect();
    assert_eq!(tiles.available_count(), 2);

    assert!(tiles.mark_unavailable(1));
    assert!(!tiles.mark_unavailable(7));
    assert!(tiles.get(0).unwrap().available);
    assert!(!tiles.get(1).unwrap().available);
    assert_eq!(tiles.available_count(), 1);
}

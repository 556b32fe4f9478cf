// THEORY:
// The `GridQuantizer` is the last stage and the only one whose output leaves
// the perception layer. It slices the refined mask into an N x N grid of cells
// and reduces each cell to a single navigation-facing verdict: free or occupied.
//
// Key architectural principles:
// 1.  **Nearest-neighbor sampling**: each cell takes the value of exactly one
//     source pixel, the one at `floor(cell * source / N)` on each axis. No
//     averaging, so the hard 0/255 distinction of the mask survives and a cell
//     is never "half occupied".
// 2.  **Fixed shape**: N is fixed for the lifetime of a pipeline, so consumers
//     can rely on the cell count never changing between frames.
// 3.  **Full regeneration**: the grid is rebuilt from scratch every frame.
//     There is no incremental update and nothing is carried over.

use crate::core_modules::segmenter::FOREGROUND;
use image::GrayImage;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// The state of a single occupancy cell. The discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellState {
    Free = 0,
    Occupied = 100,
}

impl CellState {
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// A square, row-major grid of `CellState`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    dimension: u32,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// A grid with every cell free.
    pub fn free(dimension: u32) -> Self {
        Self {
            dimension,
            cells: vec![CellState::Free; cell_count(dimension)],
        }
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn get(&self, row: u32, col: u32) -> Option<CellState> {
        if row >= self.dimension || col >= self.dimension {
            return None;
        }
        self.cells
            .get(row as usize * self.dimension as usize + col as usize)
            .copied()
    }

    /// Cell values (0 or 100), row-major.
    pub fn values(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.value()).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.dimension.max(1) as usize)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellState::Occupied)
            .count()
    }
}

impl Serialize for OccupancyGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OccupancyGrid", 2)?;
        state.serialize_field("dimension", &self.dimension)?;
        state.serialize_field("cells", &self.values())?;
        state.end()
    }
}

fn cell_count(dimension: u32) -> usize {
    dimension as usize * dimension as usize
}

/// Source pixel index sampled for cell `cell` when `source` pixels map onto `cells` cells.
fn sample_index(cell: u32, source: u32, cells: u32) -> u32 {
    let index = (cell as u64 * source as u64) / cells as u64;
    (index as u32).min(source.saturating_sub(1))
}

/// Downsamples a binary mask into an N x N occupancy grid.
pub fn quantize(mask: &GrayImage, dimension: u32) -> OccupancyGrid {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return OccupancyGrid::free(dimension);
    }
    let mut cells = Vec::with_capacity(cell_count(dimension));
    for row in 0..dimension {
        let y = sample_index(row, height, dimension);
        for col in 0..dimension {
            let x = sample_index(col, width, dimension);
            let state = if mask.get_pixel(x, y).0[0] == FOREGROUND {
                CellState::Occupied
            } else {
                CellState::Free
            };
            cells.push(state);
        }
    }
    OccupancyGrid { dimension, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn empty_mask_is_all_free() {
        let grid = quantize(&GrayImage::new(800, 600), 50);
        assert_eq!(grid.cells().len(), 2500);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn samples_top_left_pixel_of_each_block() {
        let mut mask = GrayImage::new(800, 600);
        // Block row 2, col 3 starts at (48, 24). Only its top-left pixel is set.
        mask.put_pixel(48, 24, Luma([255]));
        let grid = quantize(&mask, 50);
        assert_eq!(grid.get(2, 3), Some(CellState::Occupied));
        assert_eq!(grid.occupied_count(), 1);

        let mut shifted = GrayImage::new(800, 600);
        shifted.put_pixel(49, 25, Luma([255]));
        assert_eq!(quantize(&shifted, 50).occupied_count(), 0);
    }

    #[test]
    fn values_are_zero_or_hundred() {
        let mask = GrayImage::from_fn(100, 100, |x, y| Luma([if (x + y) % 3 == 0 { 255 } else { 0 }]));
        let grid = quantize(&mask, 10);
        assert!(grid.values().iter().all(|&v| v == 0 || v == 100));
    }

    #[test]
    fn upsampling_repeats_pixels() {
        let mut mask = GrayImage::new(2, 2);
        mask.put_pixel(1, 0, Luma([255]));
        let grid = quantize(&mask, 4);
        let rows: Vec<Vec<u8>> = grid
            .rows()
            .map(|r| r.iter().map(|c| c.value()).collect())
            .collect();
        assert_eq!(rows[0], vec![0, 0, 100, 100]);
        assert_eq!(rows[1], vec![0, 0, 100, 100]);
        assert_eq!(rows[2], vec![0, 0, 0, 0]);
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let grid = OccupancyGrid::free(5);
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.get(4, 4), Some(CellState::Free));
    }

    #[test]
    fn cell_arithmetic_does_not_wrap() {
        assert_eq!(cell_count(70_000) as u64, 4_900_000_000);
        let grid = OccupancyGrid::free(crate::config::MAX_GRID_DIMENSION);
        let last = crate::config::MAX_GRID_DIMENSION - 1;
        assert_eq!(grid.get(last, last), Some(CellState::Free));
    }

    #[test]
    fn serializes_as_flat_values() {
        let mut mask = GrayImage::new(2, 2);
        mask.put_pixel(0, 0, Luma([255]));
        let json = serde_json::to_string(&quantize(&mask, 2)).expect("serialize");
        assert_eq!(json, r#"{"dimension":2,"cells":[100,0,0,0]}"#);
    }
}

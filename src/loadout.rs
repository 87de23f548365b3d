use crate::aggregator::{LoadoutReport, LoadoutTotals};
use crate::config::SimConfig;
use crate::constants::layout::{GRID_COLS, GRID_ROWS};
use crate::error::BuildError;
use crate::part::{Part, PartCatalog, PartSpec};

/// Parts placed on the build grid, in placement order.
/// At most one part per cell.
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    parts: Vec<Part>,
}

impl Loadout {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn part_at(&self, row: usize, col: usize) -> Option<&Part> {
        self.parts.iter().find(|p| p.row == row && p.col == col)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.part_at(row, col).is_some()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BuildError> {
        if row < GRID_ROWS && col < GRID_COLS {
            Ok(())
        } else {
            Err(BuildError::OutOfBounds {
                row,
                col,
                rows: GRID_ROWS,
                cols: GRID_COLS,
            })
        }
    }

    /// Drop a part onto a cell. Occupied cells keep their part.
    pub fn place(&mut self, spec: &PartSpec, row: usize, col: usize) -> Result<&Part, BuildError> {
        self.check_bounds(row, col)?;
        if let Some(occupant) = self.part_at(row, col) {
            return Err(BuildError::CellOccupied {
                row,
                col,
                occupant: occupant.id().to_string(),
            });
        }

        self.parts.push(spec.place_at(row, col));
        let index = self.parts.len() - 1;
        Ok(&self.parts[index])
    }

    /// Place a palette part by id
    pub fn place_from_catalog(
        &mut self,
        catalog: &PartCatalog,
        id: &str,
        row: usize,
        col: usize,
    ) -> Result<&Part, BuildError> {
        let spec = catalog.lookup(id)?;
        self.place(spec, row, col)
    }

    /// Take the part off a cell, if there is one
    pub fn remove_at(&mut self, row: usize, col: usize) -> Option<Part> {
        let index = self.parts.iter().position(|p| p.row == row && p.col == col)?;
        Some(self.parts.remove(index))
    }

    pub fn clear(&mut self) {
        self.parts.clear();
    }

    pub fn totals(&self) -> LoadoutTotals {
        crate::aggregator::compute_totals(&self.parts)
    }

    pub fn report(&self, config: &SimConfig) -> LoadoutReport {
        LoadoutReport::evaluate(&self.parts, config)
    }
}

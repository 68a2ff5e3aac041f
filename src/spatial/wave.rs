//! Mutable solver state: per-cell pattern possibilities and dirty flags
//!
//! Cells are stored in `[y, x]` order. A cell whose possibilities carry no
//! weight is a contradiction; the observer notices it on its next scan.

use crate::algorithm::bitset::PatternBitset;
use ndarray::Array2;

/// Progress of a run over a wave field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStatus {
    /// Observations still pending
    Running,
    /// Every eligible cell holds a single pattern
    Done,
    /// Some cell has no possible pattern left
    Failed,
}

/// Superposition state of every output cell
#[derive(Debug, Clone)]
pub struct WaveField {
    cells: Array2<PatternBitset>,
    changes: Array2<bool>,
    window: usize,
    periodic: bool,
    status: WaveStatus,
}

impl WaveField {
    /// Create a field in full superposition
    pub fn new(
        width: usize,
        height: usize,
        pattern_count: usize,
        window: usize,
        periodic: bool,
    ) -> Self {
        Self {
            cells: Array2::from_elem((height, width), PatternBitset::all(pattern_count)),
            changes: Array2::from_elem((height, width), false),
            window,
            periodic,
            status: WaveStatus::Running,
        }
    }

    /// Return every cell to full superposition and clear run state
    pub fn initialize(&mut self) {
        for cell in &mut self.cells {
            cell.fill();
        }
        self.changes.fill(false);
        self.status = WaveStatus::Running;
    }

    /// Output width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Output height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Pattern side length N
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Whether the output wraps around its edges
    pub const fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Whether the window anchored at `(x, y)` would leave a non-periodic canvas
    pub fn on_boundary(&self, x: usize, y: usize) -> bool {
        !self.periodic
            && (x + self.window > self.cells.ncols() || y + self.window > self.cells.nrows())
    }

    /// Possibilities at a cell
    pub fn possibilities(&self, x: usize, y: usize) -> Option<&PatternBitset> {
        self.cells.get((y, x))
    }

    /// Mutable possibilities at a cell
    pub fn possibilities_mut(&mut self, x: usize, y: usize) -> Option<&mut PatternBitset> {
        self.cells.get_mut((y, x))
    }

    /// Total catalog weight of the patterns possible at a cell
    pub fn weight_sum(&self, x: usize, y: usize, weights: &[f64]) -> f64 {
        self.possibilities(x, y).map_or(0.0, |cell| {
            cell.iter()
                .map(|pattern| weights.get(pattern).copied().unwrap_or(0.0))
                .sum()
        })
    }

    /// Whether a cell awaits propagation
    pub fn is_changed(&self, x: usize, y: usize) -> bool {
        self.changes.get((y, x)).copied().unwrap_or(false)
    }

    /// Flag a cell for propagation
    pub fn mark_changed(&mut self, x: usize, y: usize) {
        if let Some(flag) = self.changes.get_mut((y, x)) {
            *flag = true;
        }
    }

    /// Clear a cell's flag, returning whether it was set
    pub fn take_changed(&mut self, x: usize, y: usize) -> bool {
        self.changes
            .get_mut((y, x))
            .is_some_and(|flag| std::mem::replace(flag, false))
    }

    /// Whether any cell awaits propagation
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|&flag| flag)
    }

    /// Current run status
    pub const fn status(&self) -> WaveStatus {
        self.status
    }

    /// Whether the field is fully collapsed
    pub fn is_done(&self) -> bool {
        self.status == WaveStatus::Done
    }

    /// Whether a contradiction was reached
    pub fn is_failed(&self) -> bool {
        self.status == WaveStatus::Failed
    }

    /// Record a terminal status
    pub const fn set_status(&mut self, status: WaveStatus) {
        self.status = status;
    }

    /// Iterate `(x, y)` in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Count cells collapsed to a single pattern
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.count() == 1).count()
    }
}

use crate::{
    analysis::catalog::PatternCatalog,
    math::probability::{roulette_index, weighted_entropy},
    spatial::wave::{WaveField, WaveStatus},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::trace;

/// Upper bound of the tie-breaking noise added to each cell's entropy
pub const ENTROPY_NOISE: f64 = 1e-6;
/// Starting minimum of the entropy scan; cells at or above it are never picked
pub const ENTROPY_CEILING: f64 = 1e3;

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw from `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Draw a fresh seed for a derived run
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random::<u64>()
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let unit = self.unit();
        roulette_index(weights, unit)
    }
}

/// Result of one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// A cell was reduced to a single pattern
    Collapsed {
        /// Column of the collapsed cell
        x: usize,
        /// Row of the collapsed cell
        y: usize,
        /// Pattern slot kept at the cell
        pattern: usize,
    },
    /// No cell with positive entropy remains
    Done,
    /// A cell has no weighted possibility left
    Contradiction {
        /// Column of the contradicted cell
        x: usize,
        /// Row of the contradicted cell
        y: usize,
    },
}

/// Find the non-boundary cell of lowest perturbed entropy
///
/// Scans row-major. Returns `Ok(None)` when every eligible cell is already
/// collapsed.
///
/// # Errors
///
/// Returns `Err((x, y))` for the first cell whose possible patterns carry no
/// weight
pub fn find_lowest_entropy(
    wave: &WaveField,
    catalog: &PatternCatalog,
    selector: &mut RandomSelector,
) -> Result<Option<(usize, usize)>, (usize, usize)> {
    let mut min = ENTROPY_CEILING;
    let mut argmin = None;

    for (x, y) in wave.coordinates() {
        if wave.on_boundary(x, y) {
            continue;
        }
        let Some(cell) = wave.possibilities(x, y) else {
            continue;
        };

        let noise = ENTROPY_NOISE * selector.unit();
        let entropy = weighted_entropy(
            cell.iter(),
            catalog.weights(),
            catalog.log_weights(),
            catalog.log_pattern_count(),
        )
        .ok_or((x, y))?;

        if entropy > 0.0 && entropy + noise < min {
            min = entropy + noise;
            argmin = Some((x, y));
        }
    }

    Ok(argmin)
}

/// Select and collapse the most constrained cell
///
/// Sets the field's status on `Done` or `Contradiction`; otherwise mutates
/// exactly one cell and flags it for propagation.
pub fn observe(
    wave: &mut WaveField,
    catalog: &PatternCatalog,
    selector: &mut RandomSelector,
) -> Observation {
    let (x, y) = match find_lowest_entropy(wave, catalog, selector) {
        Ok(Some(cell)) => cell,
        Ok(None) => {
            wave.set_status(WaveStatus::Done);
            return Observation::Done;
        }
        Err((x, y)) => {
            wave.set_status(WaveStatus::Failed);
            return Observation::Contradiction { x, y };
        }
    };

    let distribution: Vec<f64> = catalog
        .weights()
        .iter()
        .enumerate()
        .map(|(pattern, &weight)| {
            let possible = wave
                .possibilities(x, y)
                .is_some_and(|cell| cell.contains(pattern));
            if possible { weight } else { 0.0 }
        })
        .collect();
    let pattern = selector.weighted_choice(&distribution);

    if let Some(cell) = wave.possibilities_mut(x, y) {
        cell.collapse_to(pattern);
    }
    wave.mark_changed(x, y);
    trace!(x, y, pattern, "Collapsed cell");

    Observation::Collapsed { x, y, pattern }
}

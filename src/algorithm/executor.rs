use crate::{
    algorithm::decoder::to_image,
    algorithm::propagation::{PropagatorTable, propagate_to_fixpoint},
    algorithm::selection::{Observation, RandomSelector, observe},
    analysis::catalog::PatternCatalog,
    analysis::sample::Sample,
    io::configuration::ModelConfig,
    io::error::Result,
    spatial::wave::WaveField,
};
use tracing::debug;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every eligible cell collapsed to a single pattern
    Done,
    /// A cell ran out of possible patterns
    Contradiction,
    /// The observation budget ran out first
    Incomplete,
}

impl RunOutcome {
    /// Whether the wave reached a terminal state
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Contradiction)
    }
}

/// Counters describing one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// How the run ended
    pub outcome: RunOutcome,
    /// Observations made, including the terminal one
    pub observations: usize,
    /// Propagation sweeps that removed at least one pattern
    pub sweeps: usize,
}

/// Alternate observation and propagation until the wave settles
///
/// A `limit` of zero means unbounded. The field is left in whatever state the
/// run reached, so an incomplete or contradicted wave can still be decoded.
pub fn run(
    wave: &mut WaveField,
    catalog: &PatternCatalog,
    table: &PropagatorTable,
    selector: &mut RandomSelector,
    limit: usize,
) -> RunReport {
    let mut observations = 0;
    let mut sweeps = 0;

    while limit == 0 || observations < limit {
        observations += 1;
        let outcome = match observe(wave, catalog, selector) {
            Observation::Collapsed { .. } => None,
            Observation::Done => Some(RunOutcome::Done),
            Observation::Contradiction { x, y } => {
                debug!(x, y, observations, "Contradiction reached");
                Some(RunOutcome::Contradiction)
            }
        };
        if let Some(outcome) = outcome {
            return RunReport {
                outcome,
                observations,
                sweeps,
            };
        }

        sweeps += propagate_to_fixpoint(wave, table);
    }

    RunReport {
        outcome: RunOutcome::Incomplete,
        observations,
        sweeps,
    }
}

/// Overlapping model: catalog, propagator table and wave of one configuration
#[derive(Debug, Clone)]
pub struct OverlappingModel {
    catalog: PatternCatalog,
    table: PropagatorTable,
    wave: WaveField,
    limit: usize,
}

impl OverlappingModel {
    /// Build the catalog and allocate the wave for a sample
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the sample cannot
    /// produce a catalog; nothing is allocated for the wave in that case
    pub fn new(sample: &Sample, config: &ModelConfig) -> Result<Self> {
        let catalog = PatternCatalog::from_config(sample, config)?;
        let table = PropagatorTable::build(&catalog);
        let wave = WaveField::new(
            config.width,
            config.height,
            catalog.len(),
            catalog.window(),
            config.periodic_output,
        );

        Ok(Self {
            catalog,
            table,
            wave,
            limit: config.limit,
        })
    }

    /// Solve from full superposition with a fresh seed
    pub fn run(&mut self, seed: u64) -> RunReport {
        self.wave.initialize();
        let mut selector = RandomSelector::new(seed);
        let report = run(
            &mut self.wave,
            &self.catalog,
            &self.table,
            &mut selector,
            self.limit,
        );

        debug!(
            seed,
            outcome = ?report.outcome,
            observations = report.observations,
            collapsed = self.wave.collapsed_count(),
            "Run finished"
        );
        report
    }

    /// Decode the current wave to RGBA
    pub fn image(&self) -> Vec<u8> {
        to_image(&self.wave, &self.catalog)
    }

    /// The pattern catalog
    pub const fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// The compatibility table
    pub const fn table(&self) -> &PropagatorTable {
        &self.table
    }

    /// The wave left by the last run
    pub const fn wave(&self) -> &WaveField {
        &self.wave
    }

    /// Output width in cells
    pub fn width(&self) -> usize {
        self.wave.width()
    }

    /// Output height in cells
    pub fn height(&self) -> usize {
        self.wave.height()
    }
}

//! Pattern catalog extraction with occurrence weights
//!
//! Scans every window of the sample, registers the configured number of
//! symmetry variants per window and merges duplicates by canonical index.
//! Pattern slots follow first occurrence, so catalogs are reproducible.

use crate::analysis::sample::{Color, Sample};
use crate::io::configuration::{MAX_SYMMETRY, ModelConfig};
use crate::io::error::{ModelError, Result, invalid_parameter, invalid_source};
use crate::spatial::patterns::Pattern;
use std::collections::HashMap;
use tracing::debug;

/// Distinct patterns of a sample together with their statistics
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    window: usize,
    patterns: Vec<Pattern>,
    weights: Vec<f64>,
    log_weights: Vec<f64>,
    log_pattern_count: f64,
    colors: Vec<Color>,
    ground: usize,
}

impl PatternCatalog {
    /// Extract the catalog of a sample
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sample holds no colors
    /// - The window is zero, or larger than a non-periodic sample
    /// - The symmetry count is outside 1-8
    /// - The palette is too large to index windows of this size
    pub fn build(
        sample: &Sample,
        window: usize,
        periodic_input: bool,
        symmetry: usize,
        ground: i64,
    ) -> Result<Self> {
        let colors = sample.unique_colors().to_vec();
        if colors.is_empty() {
            return Err(invalid_source(&"sample contains no colors"));
        }
        if window == 0 {
            return Err(invalid_parameter(
                "window",
                &window,
                &"pattern size must be at least 1",
            ));
        }
        if symmetry == 0 || symmetry > MAX_SYMMETRY {
            return Err(invalid_parameter(
                "symmetry",
                &symmetry,
                &format!("symmetry count must be between 1 and {MAX_SYMMETRY}"),
            ));
        }

        let (columns, rows) = if periodic_input {
            (sample.width(), sample.height())
        } else {
            (
                (sample.width() + 1).saturating_sub(window),
                (sample.height() + 1).saturating_sub(window),
            )
        };
        if columns == 0 || rows == 0 {
            return Err(invalid_source(&format!(
                "a {}x{} sample has no room for {window}x{window} windows",
                sample.width(),
                sample.height()
            )));
        }

        let mut slots: HashMap<u128, usize> = HashMap::new();
        let mut patterns = Vec::new();
        let mut counts: Vec<usize> = Vec::new();

        for y in 0..rows {
            for x in 0..columns {
                let base = Pattern::from_sample(sample, x, y, window);
                for variant in base.symmetry_variants().into_iter().take(symmetry) {
                    let index = variant.index(colors.len()).ok_or_else(|| {
                        invalid_parameter(
                            "window",
                            &window,
                            &format!(
                                "{} colors in {window}x{window} windows overflow the pattern index",
                                colors.len()
                            ),
                        )
                    })?;

                    if let Some(&slot) = slots.get(&index) {
                        if let Some(count) = counts.get_mut(slot) {
                            *count += 1;
                        }
                    } else {
                        slots.insert(index, patterns.len());
                        patterns.push(variant);
                        counts.push(1);
                    }
                }
            }
        }

        let weights: Vec<f64> = counts.iter().map(|&count| count as f64).collect();
        let log_weights = weights.iter().map(|weight| weight.ln()).collect();
        let pattern_count = patterns.len();
        let ground = ground.rem_euclid(pattern_count as i64) as usize;

        debug!(
            patterns = pattern_count,
            colors = colors.len(),
            window,
            symmetry,
            "Built pattern catalog"
        );

        Ok(Self {
            window,
            patterns,
            weights,
            log_weights,
            log_pattern_count: (pattern_count as f64).ln(),
            colors,
            ground,
        })
    }

    /// Extract the catalog described by a model configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the sample cannot
    /// supply a single window
    pub fn from_config(sample: &Sample, config: &ModelConfig) -> Result<Self> {
        config.validate()?;
        Self::build(
            sample,
            config.window,
            config.periodic_input,
            config.symmetry,
            config.ground,
        )
    }

    /// Pattern side length N
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Number of distinct patterns T
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog holds no patterns
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in slot order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Pattern at a slot
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidPatternIndex`] past the end of the catalog
    pub fn pattern(&self, index: usize) -> Result<&Pattern> {
        self.patterns
            .get(index)
            .ok_or(ModelError::InvalidPatternIndex {
                index,
                pattern_count: self.patterns.len(),
            })
    }

    /// Occurrence count of each pattern
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Natural log of each weight
    pub fn log_weights(&self) -> &[f64] {
        &self.log_weights
    }

    /// Entropy assigned to a cell where every pattern is still possible
    pub const fn log_pattern_count(&self) -> f64 {
        self.log_pattern_count
    }

    /// Palette shared by every pattern
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Ground slot, normalized modulo the pattern count
    pub const fn ground(&self) -> usize {
        self.ground
    }
}

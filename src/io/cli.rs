//! Command-line interface running overlapping models with seed retries

use crate::algorithm::executor::{OverlappingModel, RunOutcome};
use crate::algorithm::selection::RandomSelector;
use crate::analysis::sample::Sample;
use crate::io::configuration::{
    BatchEntry, BatchFile, DEFAULT_ATTEMPTS, DEFAULT_GROUND, DEFAULT_HEIGHT, DEFAULT_LIMIT,
    DEFAULT_SCREENSHOTS, DEFAULT_SEED, DEFAULT_SYMMETRY, DEFAULT_WIDTH, DEFAULT_WINDOW,
    ModelConfig,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::save_rgba_png;
use crate::io::preview::ascii;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "overlapwfc")]
#[command(
    author,
    version,
    about = "Synthesize images from small samples with overlapping wave function collapse"
)]
/// Command-line arguments for the synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Sample PNG, or a TOML batch file of `[[overlapping]]` runs
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Pattern size N
    #[arg(short = 'n', long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Do not wrap sample windows around the sample edges
    #[arg(long)]
    pub no_periodic_input: bool,

    /// Wrap the output around its edges
    #[arg(short, long)]
    pub periodic: bool,

    /// Number of rotate/reflect variants per sampled window (1-8)
    #[arg(short, long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Reserved ground pattern index
    #[arg(short, long, default_value_t = DEFAULT_GROUND, allow_negative_numbers = true)]
    pub ground: i64,

    /// Observation budget per attempt, 0 for unbounded
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Images to produce per run
    #[arg(long, default_value_t = DEFAULT_SCREENSHOTS)]
    pub screenshots: usize,

    /// Seeds tried per image before giving up
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Master seed from which attempt seeds are drawn
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Directory receiving generated images
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Print ASCII previews of samples and outputs
    #[arg(long)]
    pub ascii: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Model parameters given on the command line
    pub const fn model_config(&self) -> ModelConfig {
        ModelConfig {
            window: self.window,
            width: self.width,
            height: self.height,
            periodic_input: !self.no_periodic_input,
            periodic_output: self.periodic,
            symmetry: self.symmetry,
            ground: self.ground,
            limit: self.limit,
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Runs described by the target
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG nor a readable batch file
    pub fn runs(&self) -> Result<Vec<BatchEntry>> {
        match self.target.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(BatchFile::load(&self.target)?.overlapping),
            Some("png") => {
                let name = self
                    .target
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                Ok(vec![BatchEntry {
                    name,
                    sample: self.target.clone(),
                    screenshots: self.screenshots,
                    attempts: self.attempts,
                    model: self.model_config(),
                }])
            }
            _ => Err(invalid_parameter(
                "target",
                &self.target.display(),
                &"target must be a PNG sample or a TOML batch file",
            )),
        }
    }
}

/// What one configured run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Run name
    pub name: String,
    /// Images written, in order
    pub saved: Vec<PathBuf>,
    /// Attempts that ended in a contradiction
    pub contradictions: usize,
    /// Images abandoned after every attempt contradicted
    pub abandoned: usize,
}

/// Orchestrates runs, retries and image export
pub struct BatchRunner {
    cli: Cli,
    seeds: RandomSelector,
    progress_manager: Option<ProgressManager>,
}

impl BatchRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let seeds = RandomSelector::new(cli.seed);

        Self {
            cli,
            seeds,
            progress_manager,
        }
    }

    /// Execute every run of the target
    ///
    /// # Errors
    ///
    /// Returns an error if a sample cannot be loaded, a configuration is
    /// invalid, or an image cannot be written
    pub fn process(&mut self) -> Result<Vec<RunSummary>> {
        let runs = self.cli.runs()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(runs.len());
        }

        let mut summaries = Vec::with_capacity(runs.len());
        for (index, entry) in runs.iter().enumerate() {
            summaries.push(self.process_entry(entry, index + 1)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summaries)
    }

    // Allow print for ASCII previews requested by the user
    #[allow(clippy::print_stdout)]
    fn process_entry(&mut self, entry: &BatchEntry, counter: usize) -> Result<RunSummary> {
        info!(name = %entry.name, sample = %entry.sample.display(), "Starting run");

        let sample = Sample::from_png_file(&entry.sample)?;
        if self.cli.ascii {
            println!(
                "{}\n",
                ascii(&sample.to_rgba(), sample.width(), sample.height())
            );
        }

        let mut model = OverlappingModel::new(&sample, &entry.model)?;
        info!(
            name = %entry.name,
            patterns = model.catalog().len(),
            colors = model.catalog().colors().len(),
            "Catalog ready"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_run(&entry.name, entry.screenshots);
        }

        let mut summary = RunSummary {
            name: entry.name.clone(),
            ..RunSummary::default()
        };

        for image_index in 0..entry.screenshots {
            let mut produced = false;

            for attempt in 1..=entry.attempts {
                if let Some(ref pm) = self.progress_manager {
                    pm.record_attempt(attempt, entry.attempts);
                }

                let seed = self.seeds.next_seed();
                let report = model.run(seed);

                match report.outcome {
                    RunOutcome::Contradiction => {
                        summary.contradictions += 1;
                        info!(name = %entry.name, seed, attempt, "Contradiction, retrying");
                        continue;
                    }
                    RunOutcome::Incomplete => {
                        warn!(
                            name = %entry.name,
                            seed,
                            limit = entry.model.limit,
                            "Observation budget exhausted, saving partial image"
                        );
                    }
                    RunOutcome::Done => {
                        info!(name = %entry.name, seed, observations = report.observations, "Done");
                    }
                }

                let path = self.output_path(counter, &entry.name, image_index);
                let pixels = model.image();
                save_rgba_png(&pixels, model.width(), model.height(), &path)?;
                if self.cli.ascii {
                    println!("{}\n", ascii(&pixels, model.width(), model.height()));
                }
                summary.saved.push(path);
                produced = true;
                break;
            }

            if !produced {
                summary.abandoned += 1;
                warn!(name = %entry.name, image_index, "Every attempt contradicted");
            }
            if let Some(ref pm) = self.progress_manager {
                pm.complete_image();
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_run();
        }

        Ok(summary)
    }

    fn output_path(&self, counter: usize, name: &str, image_index: usize) -> PathBuf {
        output_file_path(&self.cli.output_dir, counter, name, image_index)
    }
}

/// Output file for the `image_index`-th image of the `counter`-th run
pub fn output_file_path(dir: &Path, counter: usize, name: &str, image_index: usize) -> PathBuf {
    dir.join(format!("{counter} {name} {image_index}.png"))
}

//! Run configuration defaults, validation and batch file loading

use crate::io::error::{ModelError, Result, invalid_parameter};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// Defaults for configurable parameters
/// Default pattern window size
pub const DEFAULT_WINDOW: usize = 2;
/// Default output width in cells
pub const DEFAULT_WIDTH: usize = 48;
/// Default output height in cells
pub const DEFAULT_HEIGHT: usize = 48;
/// Samples wrap around their edges unless told otherwise
pub const DEFAULT_PERIODIC_INPUT: bool = true;
/// Outputs have hard edges unless told otherwise
pub const DEFAULT_PERIODIC_OUTPUT: bool = false;
/// Number of symmetry variants registered per sampled window
pub const DEFAULT_SYMMETRY: usize = 8;
/// Reserved ground pattern index
pub const DEFAULT_GROUND: i64 = 0;
/// Iteration limit, zero meaning unbounded
pub const DEFAULT_LIMIT: usize = 0;
/// Images saved per configured run
pub const DEFAULT_SCREENSHOTS: usize = 2;
/// Seeds tried per image before giving up on contradictions
pub const DEFAULT_ATTEMPTS: usize = 10;
/// Fixed master seed for reproducible batches
pub const DEFAULT_SEED: u64 = 42;

/// Largest number of symmetry variants of a square window
pub const MAX_SYMMETRY: usize = 8;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_OUTPUT_DIMENSION: usize = 4096;

/// Characters used for ASCII previews, darkest first
pub const ASCII_RAMP: &str = "-~=*#@$";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Parameters of one overlapping model
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Side length N of the square patterns
    pub window: usize,
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
    /// Whether sample windows wrap around the sample edges
    pub periodic_input: bool,
    /// Whether the output wraps around its edges
    pub periodic_output: bool,
    /// Number of rotate/reflect variants registered per window (1-8)
    pub symmetry: usize,
    /// Reserved ground pattern index, normalized modulo the pattern count
    pub ground: i64,
    /// Observation budget per run, zero meaning unbounded
    pub limit: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            periodic_input: DEFAULT_PERIODIC_INPUT,
            periodic_output: DEFAULT_PERIODIC_OUTPUT,
            symmetry: DEFAULT_SYMMETRY,
            ground: DEFAULT_GROUND,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ModelConfig {
    /// Check parameters that do not depend on the sample
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if the window is zero, the
    /// output is empty or too large, a non-periodic output is narrower than
    /// the window, or the symmetry count is outside 1-8
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(invalid_parameter(
                "window",
                &self.window,
                &"pattern size must be at least 1",
            ));
        }
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_OUTPUT_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("output dimension must be between 1 and {MAX_OUTPUT_DIMENSION}"),
                ));
            }
        }
        if !self.periodic_output {
            for (parameter, value) in [("width", self.width), ("height", self.height)] {
                if value < self.window {
                    return Err(invalid_parameter(
                        parameter,
                        &value,
                        &format!(
                            "non-periodic output must fit at least one {0}x{0} window",
                            self.window
                        ),
                    ));
                }
            }
        }
        if self.symmetry == 0 || self.symmetry > MAX_SYMMETRY {
            return Err(invalid_parameter(
                "symmetry",
                &self.symmetry,
                &format!("symmetry count must be between 1 and {MAX_SYMMETRY}"),
            ));
        }
        Ok(())
    }
}

/// One `[[overlapping]]` entry of a batch file
#[derive(Debug, Clone, Deserialize)]
pub struct BatchEntry {
    /// Name used in output file names
    pub name: String,
    /// Sample PNG, relative to the batch file
    pub sample: PathBuf,
    /// Images to produce for this entry
    #[serde(default = "default_screenshots")]
    pub screenshots: usize,
    /// Seeds tried per image
    #[serde(default = "default_attempts")]
    pub attempts: usize,
    /// Model parameters
    #[serde(flatten)]
    pub model: ModelConfig,
}

/// Keys accepted in an `[[overlapping]]` entry
const ENTRY_KEYS: [&str; 12] = [
    "name",
    "sample",
    "screenshots",
    "attempts",
    "window",
    "width",
    "height",
    "periodic_input",
    "periodic_output",
    "symmetry",
    "ground",
    "limit",
];

/// `samples.xml` attribute names and the keys they stand for
const LEGACY_KEYS: [(&str, &str); 3] = [
    ("N", "window"),
    ("periodicInput", "periodic_input"),
    ("periodic", "periodic_output"),
];

fn normalize_entry_keys(table: &mut toml::Table) -> std::result::Result<(), String> {
    for (legacy, key) in LEGACY_KEYS {
        if let Some(value) = table.remove(legacy) {
            if table.contains_key(key) {
                return Err(format!("entry sets both `{legacy}` and `{key}`"));
            }
            table.insert(key.to_string(), value);
        }
    }

    match table.keys().find(|key| !ENTRY_KEYS.contains(&key.as_str())) {
        Some(unknown) => Err(format!("unknown key `{unknown}` in [[overlapping]] entry")),
        None => Ok(()),
    }
}

const fn default_screenshots() -> usize {
    DEFAULT_SCREENSHOTS
}

const fn default_attempts() -> usize {
    DEFAULT_ATTEMPTS
}

/// A list of runs, the TOML counterpart of a `samples.xml` file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFile {
    /// Overlapping model runs in file order
    #[serde(default)]
    pub overlapping: Vec<BatchEntry>,
}

impl BatchFile {
    /// Parse a batch file from TOML text
    ///
    /// Entries may use the `samples.xml` attribute names `N`, `periodicInput`
    /// and `periodic`. Any other unrecognized key is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if the text is not a valid batch file
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let config_error = |reason: String| ModelError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let mut document: toml::Table =
            toml::from_str(contents).map_err(|e| config_error(e.to_string()))?;
        if let Some(toml::Value::Array(entries)) = document.get_mut("overlapping") {
            for entry in entries.iter_mut() {
                if let toml::Value::Table(table) = entry {
                    normalize_entry_keys(table).map_err(config_error)?;
                }
            }
        }

        toml::Value::Table(document)
            .try_into()
            .map_err(|e: toml::de::Error| config_error(e.to_string()))
    }

    /// Load a batch file, resolving sample paths against its directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ModelError::FileSystem {
            path: path.to_path_buf(),
            operation: "read batch file",
            source: e,
        })?;
        let mut batch = Self::parse(&contents, path)?;

        if let Some(parent) = path.parent() {
            for entry in &mut batch.overlapping {
                if entry.sample.is_relative() {
                    entry.sample = parent.join(&entry.sample);
                }
            }
        }

        Ok(batch)
    }
}

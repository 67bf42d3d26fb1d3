//! Command-line interface for solving demo tilesets

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use clap::Parser;
use log::warn;

use crate::algorithm::executor::ModelSynthesis;
use crate::analysis::summary::PlacementSummary;
use crate::analysis::timing::SpanTimings;
use crate::catalog::{Possibility, Tileset};
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_LENGTH, DEFAULT_PRESET, DEFAULT_SEED, DEFAULT_WIDTH,
    OUTPUT_SUFFIX,
};
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::io::image::export_layers_png;
use crate::io::path::generate_path;
use crate::io::presets::{self, PATH_TILE};
use crate::io::progress::ProgressManager;
use crate::spatial::Dimensions;

/// Timing table of a shared recorder, `None` with a warning if its lock is poisoned
pub fn timing_report(timings: &Arc<Mutex<SpanTimings>>) -> Option<String> {
    match timings.lock() {
        Ok(timings) => Some(timings.report()),
        Err(_) => {
            warn!("Timing report unavailable: recorder lock poisoned");
            None
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "layered-synth")]
#[command(
    author,
    version,
    about = "Fill a 3D grid with tiles by arc-consistent model synthesis"
)]
/// Command-line arguments for the synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Built-in tileset to solve (permissive, terrain)
    #[arg(short, long, default_value = DEFAULT_PRESET)]
    pub preset: String,

    /// Grid extent along x
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid extent along z
    #[arg(short = 'L', long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Grid extent along y (number of layers)
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Seeds to try before giving up; attempt n uses seed + n
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// PNG file, or directory, for the layer image
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a timing report per engine phase
    #[arg(short, long)]
    pub timings: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Pre-place a random walkway on the bottom layer (terrain only)
    #[arg(long)]
    pub path: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the layer image goes for a solve with `seed`
    ///
    /// A directory gets a generated file name; anything else is used as given.
    pub fn output_path(&self, seed: u64) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        if output.is_dir() {
            Some(output.join(format!("{}_{seed}{OUTPUT_SUFFIX}.png", self.preset)))
        } else {
            Some(output.clone())
        }
    }
}

/// Runs solves for the CLI, retrying failed seeds
pub struct SynthesisRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SynthesisRunner {
    /// Create a runner with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Solve the chosen preset, trying successive seeds after a failed solve
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Arguments are invalid (unknown preset, zero dimensions or attempts)
    /// - Every attempt ends in a contradiction or selection failure
    /// - The layer image cannot be written
    pub fn run(&mut self) -> Result<()> {
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"at least one attempt is required",
            ));
        }
        let tileset = Arc::new(presets::by_name(&self.cli.preset)?);
        let dimensions = Dimensions::new(self.cli.width, self.cli.length, self.cli.height)?;
        let timings = self.cli.timings.then(SpanTimings::shared);

        if self.cli.should_show_progress() {
            self.progress_manager = Some(ProgressManager::new(
                Arc::clone(&tileset),
                dimensions.cell_count(),
            ));
        }

        let mut last_error = None;
        for attempt in 0..self.cli.attempts {
            let seed = self.cli.seed.wrapping_add(attempt as u64);
            let mut engine = self.prepare(&tileset, seed, timings.as_ref())?;
            let preplaced = engine.cells().count();

            let started = Instant::now();
            let result = match self.progress_manager.as_mut() {
                Some(progress) => {
                    progress.start_attempt(attempt + 1, seed, preplaced);
                    engine.synthesize_with(progress)
                }
                None => engine.synthesize(),
            };

            match result {
                Ok(()) => {
                    if let Some(progress) = &self.progress_manager {
                        progress.finish();
                    }
                    return self.report(&engine, started, timings.as_ref());
                }
                Err(error @ (SynthesisError::Contradiction { .. }
                | SynthesisError::SelectionFailure { .. })) => {
                    warn!("Attempt {} with seed {seed} failed: {error}", attempt + 1);
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        if let Some(progress) = &self.progress_manager {
            progress.finish();
        }
        Err(last_error.unwrap_or_else(|| {
            invalid_parameter("attempts", &self.cli.attempts, &"no attempt was made")
        }))
    }

    fn prepare(
        &self,
        tileset: &Arc<Tileset>,
        seed: u64,
        timings: Option<&Arc<Mutex<SpanTimings>>>,
    ) -> Result<ModelSynthesis> {
        let mut engine = ModelSynthesis::new(
            Arc::clone(tileset),
            self.cli.width,
            self.cli.length,
            self.cli.height,
            seed,
        )?;
        if let Some(timings) = timings {
            engine = engine.with_instrumentation(Box::new(Arc::clone(timings)));
        }

        if self.cli.path {
            let Some(path_tile) = tileset.find(PATH_TILE) else {
                return Err(invalid_parameter(
                    "path",
                    &self.cli.preset,
                    &format!("preset has no '{PATH_TILE}' entry"),
                ));
            };
            for cell in generate_path(self.cli.width, self.cli.length, 0, seed)? {
                engine.place_tile(cell.x, cell.y, cell.z, Possibility::unrotated(path_tile))?;
            }
        }
        Ok(engine)
    }

    // Allow print for user feedback on the finished solve
    #[allow(clippy::print_stderr)]
    fn report(
        &self,
        engine: &ModelSynthesis,
        started: Instant,
        timings: Option<&Arc<Mutex<SpanTimings>>>,
    ) -> Result<()> {
        if !self.cli.quiet {
            eprintln!(
                "Solved {} grid with seed {} in {:.2?} ({} cells propagated)",
                engine.dimensions(),
                engine.seed(),
                started.elapsed(),
                engine.propagated_cells()
            );
            eprint!("{}", PlacementSummary::from_engine(engine));
        }

        if let Some(report) = timings.and_then(timing_report) {
            eprint!("{report}");
        }

        if let Some(output_path) = self.cli.output_path(engine.seed()) {
            export_layers_png(engine, &output_path)?;
            if !self.cli.quiet {
                eprintln!("Wrote {}", output_path.display());
            }
        }
        Ok(())
    }
}

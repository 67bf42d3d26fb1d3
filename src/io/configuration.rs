//! Engine constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension along any axis
pub const MAX_GRID_DIMENSION: usize = 1_000;

/// Selection weight given to entries that don't set one
pub const DEFAULT_TILE_WEIGHT: f64 = 0.5;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default grid extent along x
pub const DEFAULT_WIDTH: usize = 12;
/// Default grid extent along z
pub const DEFAULT_LENGTH: usize = 12;
/// Default grid extent along y
pub const DEFAULT_HEIGHT: usize = 3;
/// Default number of seeds tried before giving up
pub const DEFAULT_ATTEMPTS: usize = 5;
/// Demo catalog used when none is named
pub const DEFAULT_PRESET: &str = "terrain";

// Walkway generation
/// Upper bound on random walk steps, so a boxed-in walk still ends
pub const MAX_PATH_STEPS: usize = 10_000;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_layers";
/// Edge length of one cell in exported images, in pixels
pub const CELL_PIXELS: u32 = 8;
/// Transparent columns between layers in exported images
pub const LAYER_GAP_PIXELS: u32 = 4;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

//! Error types and context management for synthesis operations

use std::fmt;
use std::path::PathBuf;

use crate::algorithm::executor::SynthesisState;
use crate::catalog::Rotation;
use crate::spatial::{Dimensions, GridPosition};

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Configuration value failed validation before any solve work began
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Catalog doesn't meet structural requirements
    InvalidTileset {
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// Entry id outside the catalog
    InvalidTileIndex {
        /// The invalid entry index
        index: usize,
        /// Number of ids in the catalog
        max_tiles: usize,
    },

    /// Rotation not available for a non-rotating entry
    UnsupportedRotation {
        /// Name of the entry
        tile: String,
        /// Requested rotation
        rotation: Rotation,
    },

    /// Placement outside the grid, or a footprint reaching past its edge
    OutOfBounds {
        /// Requested cell
        position: GridPosition,
        /// Grid extent
        dimensions: Dimensions,
    },

    /// Pre-placement onto a cell that is already placed
    CellOccupied {
        /// The occupied cell
        position: GridPosition,
    },

    /// A cell's domain became empty
    ///
    /// Fatal to the solve. There is no backtracking; a caller may retry with another
    /// seed.
    Contradiction {
        /// Cell left without possibilities
        position: GridPosition,
        /// Cell whose placement started the cascade, when known
        origin: Option<GridPosition>,
        /// Entry being placed at `origin`, when known
        attempted: Option<String>,
    },

    /// Weighted sampling found no root possibility to choose
    SelectionFailure {
        /// Cell being observed
        position: GridPosition,
        /// Candidates left in the cell's domain
        candidates: usize,
    },

    /// Operation not allowed in the engine's current state
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the engine was in
        state: SynthesisState,
    },

    /// Background solver thread could not be started or did not finish cleanly
    Worker {
        /// Description of the failure
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileset { reason } => write!(f, "Invalid tileset: {reason}"),
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::UnsupportedRotation { tile, rotation } => {
                write!(f, "Tile '{tile}' cannot be placed at rotation {rotation}")
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(f, "Position {position} is outside the {dimensions} grid")
            }
            Self::CellOccupied { position } => {
                write!(f, "Position {position} already holds a placed tile")
            }
            Self::Contradiction {
                position,
                origin,
                attempted,
            } => {
                write!(f, "No possibilities left at {position}")?;
                if let Some(origin) = origin {
                    write!(f, ". Originally propagating from {origin}")?;
                }
                if let Some(attempted) = attempted {
                    write!(f, ". Tried to place {attempted}")?;
                }
                Ok(())
            }
            Self::SelectionFailure {
                position,
                candidates,
            } => {
                write!(
                    f,
                    "Failed to pick a possibility at {position} ({candidates} candidates, none anchoring)"
                )
            }
            Self::InvalidState { operation, state } => {
                write!(f, "Cannot {operation} while the engine is {state}")
            }
            Self::Worker { reason } => write!(f, "Synthesis worker failed: {reason}"),
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SynthesisError {
    /// Whether the error is a contradiction, the one failure a new seed may avoid
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Cell whose placement triggered the failing operation
    pub origin: Option<GridPosition>,
    /// Name of the entry being placed at `origin`
    pub attempted: Option<String>,
}

/// Enriches errors with the placement that caused them
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<SynthesisError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only contradictions carry the originating placement
            if let SynthesisError::Contradiction {
                origin, attempted, ..
            } = &mut error
            {
                if origin.is_none() {
                    *origin = context.origin;
                }
                if attempted.is_none() {
                    *attempted = context.attempted;
                }
            }
            error
        })
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

//! PNG export of resolved grids, one panel per layer

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::algorithm::executor::ModelSynthesis;
use crate::catalog::TileId;
use crate::io::configuration::{CELL_PIXELS, LAYER_GAP_PIXELS};
use crate::io::error::{Result, SynthesisError};
use crate::spatial::GridPosition;

// Distinct, fully opaque colours; ids beyond the palette wrap around
const PALETTE: [[u8; 4]; 8] = [
    [110, 160, 70, 255],
    [60, 110, 200, 255],
    [200, 170, 110, 255],
    [150, 150, 150, 255],
    [170, 80, 60, 255],
    [230, 200, 60, 255],
    [120, 70, 150, 255],
    [70, 170, 170, 255],
];

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Colour used for an entry
pub fn tile_color(tile: TileId) -> Rgba<u8> {
    let rgba = PALETTE
        .get(tile.index() % PALETTE.len())
        .copied()
        .unwrap_or([0, 0, 0, 255]);
    Rgba(rgba)
}

/// Draw every layer side by side, bottom layer leftmost, north up
///
/// Cells holding entries flagged `dont_instantiate` stay transparent.
///
/// # Errors
///
/// Returns an error if the engine has not resolved every cell.
pub fn render_layers(engine: &ModelSynthesis) -> Result<RgbaImage> {
    if !engine.is_complete() {
        return Err(SynthesisError::InvalidState {
            operation: "render an unfinished grid",
            state: engine.state(),
        });
    }

    let dimensions = engine.dimensions();
    let panel_width = dimensions.width as u32 * CELL_PIXELS;
    let panel_height = dimensions.length as u32 * CELL_PIXELS;
    let layers = dimensions.height as u32;
    let width = panel_width * layers + LAYER_GAP_PIXELS * layers.saturating_sub(1);

    let mut img = ImageBuffer::from_pixel(width, panel_height, TRANSPARENT);
    let tileset = engine.tileset();

    for (position, cell) in engine.cells() {
        let tile = cell.possibility.tile;
        if tileset.tile(tile).is_none_or(|entry| entry.dont_instantiate()) {
            continue;
        }
        let (left, top) = panel_origin(position, dimensions.length, panel_width);
        let color = tile_color(tile);
        for dx in 0..CELL_PIXELS {
            for dy in 0..CELL_PIXELS {
                img.put_pixel(left + dx, top + dy, color);
            }
        }
    }
    Ok(img)
}

/// Render the grid and save it as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The engine has not resolved every cell
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layers_png(engine: &ModelSynthesis, output_path: &Path) -> Result<()> {
    let img = render_layers(engine)?;

    if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SynthesisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

// Top-left pixel of a cell; z grows upward in the image
fn panel_origin(position: GridPosition, length: usize, panel_width: u32) -> (u32, u32) {
    let layer_left = position.y as u32 * (panel_width + LAYER_GAP_PIXELS);
    let left = layer_left + position.x as u32 * CELL_PIXELS;
    let top = (length - 1 - position.z) as u32 * CELL_PIXELS;
    (left, top)
}

//! Built-in demo tilesets
//!
//! Every neighbour pair is declared from both sides, so neither preset triggers the
//! asymmetry warning.

use crate::catalog::{Tile, Tileset, TilesetBuilder};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{Direction, Footprint};

/// Names accepted by [`by_name`]
pub const PRESET_NAMES: [&str; 2] = ["permissive", "terrain"];

/// Name of the terrain entry used for pre-placed walkways
pub const PATH_TILE: &str = "path";

/// Look a preset up by name
///
/// # Errors
///
/// Returns an error if the name is unknown.
pub fn by_name(name: &str) -> Result<Tileset> {
    match name {
        "permissive" => permissive(),
        "terrain" => terrain(),
        _ => Err(invalid_parameter(
            "preset",
            &name,
            &format!("expected one of: {}", PRESET_NAMES.join(", ")),
        )),
    }
}

/// Two single-cell entries that accept each other and the border everywhere
///
/// # Errors
///
/// Returns an error only if the catalog fails validation.
pub fn permissive() -> Result<Tileset> {
    let mut builder = TilesetBuilder::new();
    let border = builder.set_border(Tile::new("border"));
    let a = builder.add_tile(Tile::new("a"));
    let b = builder.add_tile(Tile::new("b").with_weight(1.0));

    let everything = [a, b, border];
    for direction in Direction::ALL {
        builder.allow_all(a, direction, &everything);
        builder.allow_all(b, direction, &everything);
    }
    builder.build()
}

/// A ground layer with an open upper volume
///
/// Layer zero holds ground, water and path. Above it sits invisible void, stacking
/// pillars that copy the rotation of the pillar below, and a two-cell bench that only
/// stands on ground or path.
///
/// # Errors
///
/// Returns an error only if the catalog fails validation.
pub fn terrain() -> Result<Tileset> {
    let mut builder = TilesetBuilder::new();
    let border = builder.set_border(Tile::new("border"));
    let ground = builder.add_tile(Tile::new("ground").with_weight(1.0));
    let water = builder.add_tile(Tile::new("water").with_weight(0.4));
    let path = builder.add_tile(Tile::new(PATH_TILE).with_weight(0.2));
    let void = builder.add_tile(Tile::new("void").invisible().with_weight(2.0));
    let pillar = builder.add_tile(
        Tile::new("pillar")
            .with_rotation()
            .with_stacked_rotation()
            .with_weight(0.15),
    );
    let bench = builder.add_tile(
        Tile::new("bench")
            .with_rotation()
            .with_footprint(Footprint { x: 2, y: 1, z: 1 })
            .with_weight(0.1),
    );

    let floor = [ground, water, path];
    let upper = [void, pillar, bench];

    for direction in Direction::CARDINAL {
        for (a, b) in [
            (ground, ground),
            (ground, water),
            (ground, path),
            (water, water),
            (path, path),
        ] {
            builder.allow_mutual(a, direction, b);
        }
        for &a in &upper {
            for &b in &upper {
                builder.allow(a, direction, b);
            }
        }
        for tile in floor.into_iter().chain(upper) {
            builder.allow(tile, direction, border);
        }
    }

    for tile in floor {
        builder.allow(tile, Direction::Below, border);
        builder.allow(tile, Direction::Above, border);
        builder.allow_mutual(tile, Direction::Above, void);
    }
    for tile in [ground, path] {
        builder.allow_mutual(tile, Direction::Above, pillar);
        builder.allow_mutual(tile, Direction::Above, bench);
    }
    for tile in upper {
        builder.allow(tile, Direction::Above, border);
    }
    builder.allow_mutual(void, Direction::Above, void);
    builder.allow_mutual(pillar, Direction::Above, pillar);
    builder.allow_mutual(pillar, Direction::Above, void);
    builder.allow_mutual(bench, Direction::Above, void);

    builder.build()
}

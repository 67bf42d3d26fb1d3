//! Tests for the built-in demo tilesets

#[cfg(test)]
mod tests {
    use layered_synth::algorithm::executor::ModelSynthesis;
    use layered_synth::catalog::{Possibility, Rotation};
    use layered_synth::io::error::SynthesisError;
    use layered_synth::io::presets::{self, PATH_TILE, PRESET_NAMES};
    use layered_synth::spatial::{Direction, GridPosition};

    #[test]
    fn test_every_name_loads() {
        for name in PRESET_NAMES {
            let tileset = presets::by_name(name).expect("preset builds");
            assert!(!tileset.is_empty(), "{name} has entries");
            assert!(
                tileset.asymmetric_declarations().is_empty(),
                "{name} declares every pair from both sides"
            );
        }
        assert!(matches!(
            presets::by_name("castle"),
            Err(SynthesisError::InvalidParameter {
                parameter: "preset",
                ..
            })
        ));
    }

    #[test]
    fn test_terrain_entries() {
        let tileset = presets::terrain().expect("terrain preset builds");
        assert_eq!(tileset.len(), 6);
        assert!(tileset.find(PATH_TILE).is_some());

        let void = tileset.find("void").and_then(|id| tileset.tile(id)).expect("void");
        assert!(void.dont_instantiate());
        let pillar = tileset.find("pillar").and_then(|id| tileset.tile(id)).expect("pillar");
        assert!(pillar.same_rotation_when_stacked());
        let bench = tileset.find("bench").and_then(|id| tileset.tile(id)).expect("bench");
        assert_eq!(bench.rotated_footprint(Rotation::Ninety).volume(), 2);
        assert!(presets::permissive().expect("permissive builds").find(PATH_TILE).is_none());
    }

    // Tests the floor layer holds only floor entries and nothing visible floats
    // Verified by letting void sit under other entries
    #[test]
    fn test_terrain_layers() {
        let tileset = presets::terrain().expect("terrain preset builds");
        let floor: Vec<_> = ["ground", "water", PATH_TILE]
            .into_iter()
            .filter_map(|name| tileset.find(name))
            .collect();
        let void = tileset.find("void").expect("preset entry");
        let water = tileset.find("water").expect("preset entry");
        let path = tileset.find(PATH_TILE).expect("preset entry");

        let mut engine = ModelSynthesis::new(tileset, 8, 8, 3, 17).expect("valid engine");
        engine.synthesize().expect("terrain always solves");

        let dimensions = engine.dimensions();
        for (position, cell) in engine.cells() {
            let tile = cell.possibility.tile;
            assert_eq!(position.y == 0, floor.contains(&tile), "layer of {position}");
            if position.y > 0 && tile != void {
                let below = GridPosition::new(position.x, position.y - 1, position.z);
                let under = engine.resolved(below).map(|cell| cell.possibility.tile);
                assert!(under.is_some_and(|under| under != void && under != water));
            }
            if tile == water {
                for direction in Direction::CARDINAL {
                    let next = dimensions
                        .neighbour(position, direction)
                        .and_then(|next| engine.resolved(next));
                    assert!(next.is_none_or(|next| next.possibility.tile != path));
                }
            }
        }
    }

    // Tests stacked pillars share one rotation
    // Verified by dropping the stacking flag from the pillar
    #[test]
    fn test_terrain_pillars_stack_aligned() {
        let tileset = presets::terrain().expect("terrain preset builds");
        let ground = tileset.find("ground").expect("preset entry");
        let pillar = tileset.find("pillar").expect("preset entry");

        let mut engine = ModelSynthesis::new(tileset, 1, 1, 4, 3).expect("valid engine");
        engine
            .place_tile(0, 0, 0, Possibility::unrotated(ground))
            .expect("in bounds");
        engine
            .place_tile(0, 1, 0, Possibility::new(pillar, Rotation::TwoSeventy))
            .expect("in bounds");
        engine.synthesize().expect("pillars or void fit above");

        for y in 2..4 {
            let cell = engine
                .resolved(GridPosition::new(0, y, 0))
                .expect("resolved")
                .possibility;
            if cell.tile == pillar {
                assert_eq!(cell.rotation, Rotation::TwoSeventy);
            }
        }
    }

    #[test]
    fn test_permissive_always_solves() {
        let tileset = presets::permissive().expect("permissive preset builds");
        for seed in 0..20 {
            let mut engine =
                ModelSynthesis::new(tileset.clone(), 4, 3, 2, seed).expect("valid engine");
            engine.synthesize().expect("permissive always solves");
            assert!(engine.is_complete());
        }
    }
}

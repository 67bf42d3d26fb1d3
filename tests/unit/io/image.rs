//! Tests for layer rendering and PNG export

#[cfg(test)]
mod tests {
    use std::fs;

    use image::Rgba;
    use layered_synth::algorithm::executor::ModelSynthesis;
    use layered_synth::catalog::{Possibility, TileId};
    use layered_synth::io::error::SynthesisError;
    use layered_synth::io::image::{export_layers_png, render_layers, tile_color};
    use layered_synth::io::presets;

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Ground floor with a bench and a void cell above it, fully pre-placed
    fn furnished() -> (ModelSynthesis, TileId, TileId) {
        let tileset = presets::terrain().expect("terrain preset builds");
        let ground = tileset.find("ground").expect("preset entry");
        let bench = tileset.find("bench").expect("preset entry");
        let void = tileset.find("void").expect("preset entry");

        let mut engine = ModelSynthesis::new(tileset, 3, 1, 2, 0).expect("valid engine");
        for x in 0..3 {
            engine
                .place_tile(x, 0, 0, Possibility::unrotated(ground))
                .expect("ground fits the floor");
        }
        engine
            .place_tile(0, 1, 0, Possibility::unrotated(bench))
            .expect("bench fits along x");
        engine
            .place_tile(2, 1, 0, Possibility::unrotated(void))
            .expect("void fits above ground");
        engine.synthesize().expect("every cell is placed");
        (engine, ground, bench)
    }

    #[test]
    fn test_palette_wraps_and_is_opaque() {
        assert_eq!(tile_color(TileId::new(1)), tile_color(TileId::new(9)));
        assert_ne!(tile_color(TileId::new(1)), tile_color(TileId::new(2)));
        assert!((0..16).all(|index| tile_color(TileId::new(index))[3] == 255));
    }

    // Tests layers sit side by side with a transparent gap and invisible entries left clear
    // Verified by drawing invisible entries like any other
    #[test]
    fn test_render_layers_layout() {
        let (engine, ground, bench) = furnished();
        let img = render_layers(&engine).expect("complete grid");

        assert_eq!(img.dimensions(), (3 * 8 * 2 + 4, 8));
        assert_eq!(*img.get_pixel(0, 0), tile_color(ground));
        assert_eq!(*img.get_pixel(23, 7), tile_color(ground));
        assert_eq!(*img.get_pixel(25, 3), CLEAR);
        assert_eq!(*img.get_pixel(28, 0), tile_color(bench));
        assert_eq!(*img.get_pixel(43, 7), tile_color(bench));
        assert_eq!(*img.get_pixel(44, 0), CLEAR);
    }

    // Tests rows with larger z are drawn nearer the top
    // Verified by drawing rows top-down in z order
    #[test]
    fn test_render_z_grows_upward() {
        let tileset = presets::permissive().expect("permissive preset builds");
        let a = tileset.find("a").expect("preset entry");
        let b = tileset.find("b").expect("preset entry");
        let mut engine = ModelSynthesis::new(tileset, 2, 2, 1, 0).expect("valid engine");
        engine
            .place_tile(0, 0, 1, Possibility::unrotated(a))
            .expect("in bounds");
        for (x, z) in [(0, 0), (1, 0), (1, 1)] {
            engine
                .place_tile(x, 0, z, Possibility::unrotated(b))
                .expect("in bounds");
        }
        engine.synthesize().expect("every cell is placed");

        let img = render_layers(&engine).expect("complete grid");
        assert_eq!(img.dimensions(), (16, 16));
        assert_eq!(*img.get_pixel(0, 0), tile_color(a));
        assert_eq!(*img.get_pixel(0, 8), tile_color(b));
    }

    #[test]
    fn test_render_requires_complete_grid() {
        let tileset = presets::permissive().expect("permissive preset builds");
        let engine = ModelSynthesis::new(tileset, 2, 2, 1, 0).expect("valid engine");
        assert!(matches!(
            render_layers(&engine),
            Err(SynthesisError::InvalidState { .. })
        ));
    }

    // Tests PNG export creates missing parent directories
    // Verified by disabling directory creation
    #[test]
    fn test_export_creates_file() {
        let (engine, _, _) = furnished();
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("renders").join("bench.png");

        export_layers_png(&engine, &output).expect("export succeeds");
        assert!(output.exists());
        let reloaded = image::open(&output).expect("valid png").to_rgba8();
        assert_eq!(reloaded, render_layers(&engine).expect("complete grid"));
    }

    // Tests a parent that is a file reports a file system error
    #[test]
    fn test_export_into_file_parent_fails() {
        let (engine, _, _) = furnished();
        let dir = tempfile::tempdir().expect("temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").expect("write blocker");

        let result = export_layers_png(&engine, &blocker.join("out.png"));
        assert!(matches!(result, Err(SynthesisError::FileSystem { .. })));
    }
}

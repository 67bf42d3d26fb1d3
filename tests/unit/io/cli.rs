//! Tests for command-line parsing and the retrying runner

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use clap::Parser;
    use layered_synth::analysis::timing::{Span, SpanTimings};
    use layered_synth::io::cli::{Cli, SynthesisRunner, timing_report};
    use layered_synth::io::configuration::{
        DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_LENGTH, DEFAULT_PRESET, DEFAULT_SEED,
        DEFAULT_WIDTH,
    };
    use layered_synth::io::error::SynthesisError;

    // Tests every option falls back to its configured default
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.preset, DEFAULT_PRESET);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.length, DEFAULT_LENGTH);
        assert_eq!(cli.height, DEFAULT_HEIGHT);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.attempts, DEFAULT_ATTEMPTS);
        assert_eq!(cli.output, None);
        assert!(!cli.timings);
        assert!(!cli.quiet);
        assert!(!cli.path);
    }

    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "--preset",
            "permissive",
            "-W",
            "7",
            "-L",
            "5",
            "-H",
            "2",
            "--seed",
            "123",
            "--attempts",
            "2",
            "--output",
            "out.png",
            "--timings",
            "--quiet",
            "--path",
        ]);

        assert_eq!(cli.preset, "permissive");
        assert_eq!((cli.width, cli.length, cli.height), (7, 5, 2));
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.attempts, 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert!(cli.timings && cli.quiet && cli.path);
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(Cli::parse_from(["program"]).should_show_progress());
        assert!(!Cli::parse_from(["program", "-q"]).should_show_progress());
    }

    // Tests a directory output gets a generated file name
    #[test]
    fn test_output_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dir_arg = dir.path().to_string_lossy().into_owned();

        let into_dir = Cli::parse_from(["program", "-o", dir_arg.as_str()]);
        assert_eq!(
            into_dir.output_path(9),
            Some(dir.path().join("terrain_9_layers.png"))
        );

        let file = Cli::parse_from(["program", "-o", "grid.png"]);
        assert_eq!(file.output_path(9), Some(PathBuf::from("grid.png")));
        assert_eq!(Cli::parse_from(["program"]).output_path(9), None);
    }

    // Tests a full run writes the layer image
    #[test]
    fn test_run_writes_image() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("nested").join("terrain.png");
        let output_arg = output.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "program",
            "-W",
            "6",
            "-L",
            "5",
            "-H",
            "2",
            "--path",
            "--timings",
            "-q",
            "-o",
            output_arg.as_str(),
        ]);

        SynthesisRunner::new(cli).run().expect("terrain always solves");
        let img = image::open(&output).expect("written image").to_rgba8();
        assert_eq!(img.dimensions(), (6 * 8 * 2 + 4, 5 * 8));
    }

    // Tests argument errors surface before any solve
    #[test]
    fn test_run_rejects_bad_arguments() {
        let unknown = Cli::parse_from(["program", "-p", "castle", "-q"]);
        assert!(matches!(
            SynthesisRunner::new(unknown).run(),
            Err(SynthesisError::InvalidParameter {
                parameter: "preset",
                ..
            })
        ));

        let no_attempts = Cli::parse_from(["program", "-a", "0", "-q"]);
        assert!(matches!(
            SynthesisRunner::new(no_attempts).run(),
            Err(SynthesisError::InvalidParameter {
                parameter: "attempts",
                ..
            })
        ));

        let flat = Cli::parse_from(["program", "-H", "0", "-q"]);
        assert!(matches!(
            SynthesisRunner::new(flat).run(),
            Err(SynthesisError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));

        let no_walkway = Cli::parse_from(["program", "-p", "permissive", "--path", "-q"]);
        assert!(matches!(
            SynthesisRunner::new(no_walkway).run(),
            Err(SynthesisError::InvalidParameter {
                parameter: "path",
                ..
            })
        ));
    }

    // Tests the timing table is skipped when the recorder lock is poisoned
    // Verified by unwrapping the lock result in timing_report
    #[test]
    fn test_timing_report_poisoned() {
        let timings = SpanTimings::shared();
        if let Ok(mut recorder) = timings.lock() {
            recorder.record(Span::Observe, Duration::from_millis(2));
        }
        let report = timing_report(&timings).expect("healthy recorder");
        assert!(report.contains(Span::Observe.label()));

        let shared = Arc::clone(&timings);
        let crashed = thread::spawn(move || {
            let _held = shared.lock();
            std::panic::resume_unwind(Box::new("recorder poisoned"));
        })
        .join();
        assert!(crashed.is_err());
        assert!(timings.is_poisoned());
        assert_eq!(timing_report(&timings), None);
    }
}

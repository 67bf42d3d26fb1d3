//! Tests for span timing and its statistics

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use layered_synth::algorithm::executor::ModelSynthesis;
    use layered_synth::analysis::timing::{Instrumentation, Span, SpanStats, SpanTimings};
    use layered_synth::io::presets;

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(SpanStats::from_samples(&[]), None);
        assert_eq!(SpanTimings::new().stats(Span::Observe), None);
    }

    // Tests the median averages the middle pair for an even count
    // Verified by taking the upper middle sample
    #[test]
    fn test_stats_values() {
        let stats = SpanStats::from_samples(&[ms(4), ms(1), ms(3), ms(2)]).expect("samples");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.total, ms(10));
        assert_eq!(stats.min, ms(1));
        assert_eq!(stats.max, ms(4));
        assert_eq!(stats.median, Duration::from_micros(2500));
        assert!((stats.mean.as_secs_f64() - 0.0025).abs() < 1e-9);
        assert!((stats.std_dev.as_secs_f64() - 0.001_118).abs() < 1e-6);

        let odd = SpanStats::from_samples(&[ms(9), ms(1), ms(5)]).expect("samples");
        assert_eq!(odd.median, ms(5));
    }

    #[test]
    fn test_record_and_report() {
        let mut timings = SpanTimings::new();
        timings.record(Span::Observe, ms(2));
        timings.record(Span::Observe, ms(4));

        assert_eq!(timings.samples(Span::Observe), &[ms(2), ms(4)]);
        assert!(timings.samples(Span::LocalPropagation).is_empty());

        let report = timings.report();
        assert!(report.starts_with("span"));
        assert!(report.contains("observe"));
        assert!(!report.contains("global propagation"));
        assert_eq!(report.lines().count(), 2);
    }

    // Tests a stop without a matching start records nothing
    #[test]
    fn test_start_stop_pairs() {
        let mut timings = SpanTimings::new();
        timings.stop(Span::Observe);
        assert!(timings.samples(Span::Observe).is_empty());

        let value = timings.measure(Span::GlobalPropagation, || 7);
        assert_eq!(value, 7);
        assert_eq!(timings.samples(Span::GlobalPropagation).len(), 1);
    }

    // Tests an engine reports every phase to a shared recorder
    // Verified by skipping the span around local propagation
    #[test]
    fn test_engine_reports_spans() {
        let timings = SpanTimings::shared();
        let tileset = presets::permissive().expect("permissive preset builds");
        let mut engine = ModelSynthesis::new(tileset, 3, 3, 1, 2)
            .expect("valid engine")
            .with_instrumentation(Box::new(Arc::clone(&timings)));
        engine.synthesize().expect("permissive always solves");

        let recorded = timings.lock().expect("recorder lock");
        assert_eq!(recorded.samples(Span::GlobalPropagation).len(), 1);
        assert_eq!(recorded.samples(Span::Observe).len(), 9);
        assert_eq!(recorded.samples(Span::LocalPropagation).len(), 9);
    }

    #[test]
    fn test_shared_recorder_forwards() {
        let shared: Arc<Mutex<SpanTimings>> = SpanTimings::shared();
        let mut handle = Arc::clone(&shared);
        handle.start(Span::LocalPropagation);
        handle.stop(Span::LocalPropagation);
        assert_eq!(
            shared
                .lock()
                .expect("recorder lock")
                .samples(Span::LocalPropagation)
                .len(),
            1
        );
        assert_eq!(Span::Observe.to_string(), "observe");
        assert_eq!(Span::ALL.len(), 3);
    }
}

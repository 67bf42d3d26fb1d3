//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;

    use layered_synth::algorithm::executor::SynthesisState;
    use layered_synth::catalog::Rotation;
    use layered_synth::io::error::{
        ErrorContext, SynthesisError, WithContext, invalid_parameter,
    };
    use layered_synth::spatial::{Dimensions, GridPosition};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SynthesisError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };
        assert!(error.source().is_some());

        let converted = SynthesisError::from(std::io::Error::other("disk full"));
        assert!(converted.to_string().contains("disk full"));
        assert!(invalid_parameter("width", &0, &"too small").source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("width", &-1, &"must be positive");
        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains("-1"));
        assert!(message.contains("must be positive"));
    }

    // Tests contradiction messages name the cascade's origin when known
    // Verified by omitting the origin from the message
    #[test]
    fn test_contradiction_message() {
        let bare = SynthesisError::Contradiction {
            position: GridPosition::new(1, 2, 3),
            origin: None,
            attempted: None,
        };
        assert_eq!(bare.to_string(), "No possibilities left at (1, 2, 3)");
        assert!(bare.is_contradiction());

        let full = SynthesisError::Contradiction {
            position: GridPosition::new(1, 0, 0),
            origin: Some(GridPosition::new(0, 0, 0)),
            attempted: Some("water".to_string()),
        };
        let message = full.to_string();
        assert!(message.contains("Originally propagating from (0, 0, 0)"));
        assert!(message.contains("Tried to place water"));
    }

    #[test]
    fn test_other_messages() {
        let dimensions = Dimensions::new(4, 5, 2).expect("valid dimensions");
        let out = SynthesisError::OutOfBounds {
            position: GridPosition::new(4, 0, 0),
            dimensions,
        };
        assert!(out.to_string().contains("(4, 0, 0)"));
        assert!(!out.is_contradiction());

        let rotation = SynthesisError::UnsupportedRotation {
            tile: "ground".to_string(),
            rotation: Rotation::Ninety,
        };
        assert!(rotation.to_string().contains("ground"));

        let state = SynthesisError::InvalidState {
            operation: "synthesize",
            state: SynthesisState::Finished,
        };
        assert_eq!(
            state.to_string(),
            "Cannot synthesize while the engine is finished"
        );

        let selection = SynthesisError::SelectionFailure {
            position: GridPosition::new(0, 0, 0),
            candidates: 3,
        };
        assert!(selection.to_string().contains("3 candidates"));
    }

    // Tests context fills only missing contradiction fields
    // Verified by overwriting an origin that was already set
    #[test]
    fn test_with_context() {
        let context = ErrorContext {
            origin: Some(GridPosition::new(5, 0, 0)),
            attempted: Some("bench".to_string()),
        };

        let known: Result<(), SynthesisError> = Err(SynthesisError::Contradiction {
            position: GridPosition::new(1, 0, 0),
            origin: Some(GridPosition::new(2, 0, 0)),
            attempted: None,
        });
        match known.with_context(context.clone()) {
            Err(SynthesisError::Contradiction {
                origin, attempted, ..
            }) => {
                assert_eq!(origin, Some(GridPosition::new(2, 0, 0)));
                assert_eq!(attempted.as_deref(), Some("bench"));
            }
            other => unreachable!("expected a contradiction, got {other:?}"),
        }

        let unrelated: Result<(), SynthesisError> =
            Err(SynthesisError::CellOccupied {
                position: GridPosition::new(0, 0, 0),
            });
        assert!(matches!(
            unrelated.with_context(context),
            Err(SynthesisError::CellOccupied { .. })
        ));

        let fine: Result<u8, SynthesisError> = Ok(3);
        assert_eq!(fine.with_context(ErrorContext::default()).ok(), Some(3));
    }
}

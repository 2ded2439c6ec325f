//! Tests for error formatting, source chaining and context enrichment

#[cfg(test)]
mod tests {
    use seamquilt::QuiltError;
    use seamquilt::io::error::{WithContext, computation_error, invalid_parameter, seam_invariant};
    use std::error::Error;

    // Tests filesystem errors keep their source
    // Verified by returning None from source
    #[test]
    fn test_error_source_chain() {
        let error = QuiltError::FileSystem {
            path: "/tmp/out.png".into(),
            operation: "write",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(error.source().is_some());
        assert!(computation_error("scoring", &"bad").source().is_none());
    }

    // Tests parameter errors carry the name, value and reason
    // Verified by omitting the value from the message
    #[test]
    fn test_invalid_parameter_message() {
        let error = invalid_parameter("overlap", &2, &"must exceed 2");
        let message = error.to_string();
        assert!(message.contains("overlap"));
        assert!(message.contains("'2'"));
        assert!(message.contains("must exceed 2"));
    }

    // Tests empty library errors describe the source and tile geometry
    // Verified by swapping width and height in the message
    #[test]
    fn test_empty_library_message() {
        let error = QuiltError::EmptyLibrary {
            source_dimensions: (20, 10),
            tile_side: 16,
            step: 4,
        };
        let message = error.to_string();
        assert!(message.contains("20x10"));
        assert!(message.contains("16x16"));
        assert!(message.contains("step 4"));
    }

    // Tests the placement cursor is attached to seam errors
    // Verified by dropping the cursor in at_cursor
    #[test]
    fn test_seam_error_gains_cursor() {
        let result: Result<(), QuiltError> = Err(seam_invariant(&"fill leaked"));
        let error = result.at_cursor([12, 30]).unwrap_err();

        assert!(matches!(
            error,
            QuiltError::SeamInvariant {
                cursor: Some([12, 30]),
                ..
            }
        ));
        assert!(error.to_string().contains("(12, 30)"));
    }

    // Tests the cursor leaves every other variant untouched
    // Verified by converting all errors into seam errors
    #[test]
    fn test_cursor_only_targets_seam_errors() {
        let computation: Result<(), QuiltError> = Err(computation_error("composite", &"size"));
        let error = computation.at_cursor([1, 1]).unwrap_err();
        assert!(matches!(
            error,
            QuiltError::Computation {
                operation: "composite",
                ..
            }
        ));

        let ok: Result<u8, QuiltError> = Ok(3);
        assert_eq!(ok.at_cursor([4, 4]).unwrap(), 3);
    }
}

//! Tests for default parameters and constants

#[cfg(test)]
mod tests {
    use seamquilt::QuiltConfig;
    use seamquilt::io::configuration::{
        BLOCKS_SUFFIX, DEFAULT_HEIGHT, DEFAULT_OVERLAP, DEFAULT_STEP, DEFAULT_TILE_SIDE,
        DEFAULT_TOLERANCE, DEFAULT_WIDTH, MASK_SUFFIX, MIN_OVERLAP_EXCLUSIVE, SEAMS_SUFFIX,
    };

    // Tests the defaults form a valid configuration
    // Verified by lowering the default tile side below twice the overlap
    #[test]
    fn test_defaults_validate() {
        let config = QuiltConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_side: DEFAULT_TILE_SIDE,
            overlap: DEFAULT_OVERLAP,
            step: DEFAULT_STEP,
            tolerance: DEFAULT_TOLERANCE,
            include_rotations: false,
            workers: 1,
        };
        assert!(config.validate().is_ok());
        assert!(DEFAULT_OVERLAP > MIN_OVERLAP_EXCLUSIVE);
    }

    // Tests debug suffixes are distinct
    // Verified by reusing the mask suffix for seams
    #[test]
    fn test_debug_suffixes_distinct() {
        assert_ne!(BLOCKS_SUFFIX, MASK_SUFFIX);
        assert_ne!(MASK_SUFFIX, SEAMS_SUFFIX);
        assert_ne!(BLOCKS_SUFFIX, SEAMS_SUFFIX);
    }
}

//! Tests for generation constants and defaults

#[cfg(test)]
mod tests {
    use tilecollapse::io::configuration::{
        DEFAULT_HEIGHT, DEFAULT_MAP_COUNT, DEFAULT_MAX_RETRIES, DEFAULT_SCALE, DEFAULT_SEED,
        DEFAULT_WIDTH, GIF_FRAME_DELAY_MS, MAX_CAPTURED_FRAMES, MAX_GRID_DIMENSION,
        MAX_INDIVIDUAL_PROGRESS_BARS, MAX_SCALE, OUTPUT_SUFFIX, PROGRESS_BAR_WIDTH, TILE_PALETTE,
        UNDETERMINED_COLOR, VIEWER_MIN_FRAME_DELAY_MS, VISUALIZATION_SUFFIX,
    };

    // Tests default map size fits inside the dimension limit
    // Verified by raising the default width past the limit
    #[test]
    fn test_default_dimensions() {
        assert_eq!((DEFAULT_WIDTH, DEFAULT_HEIGHT), (32, 32));
        assert!(DEFAULT_WIDTH <= MAX_GRID_DIMENSION);
        assert!(DEFAULT_HEIGHT <= MAX_GRID_DIMENSION);
    }

    // Tests default seed value
    // Verified by changing default seed
    #[test]
    fn test_default_seed_value() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests run defaults are usable
    // Verified by setting the default scale to zero
    #[test]
    fn test_run_defaults() {
        assert!(DEFAULT_MAX_RETRIES > 0);
        assert_eq!(DEFAULT_MAP_COUNT, 1);
        assert!(DEFAULT_SCALE > 0);
        assert!(DEFAULT_SCALE <= MAX_SCALE);
    }

    // Tests palette colours are opaque and distinct from each other
    // Verified by duplicating the Sand colour for Grass
    #[test]
    fn test_palette_distinct() {
        for (i, a) in TILE_PALETTE.iter().enumerate() {
            assert_eq!(a[3], 255);
            assert_ne!(*a, UNDETERMINED_COLOR);
            for b in TILE_PALETTE.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    // Tests progress bar settings
    // Verified by changing width value
    #[test]
    fn test_progress_settings() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(PROGRESS_BAR_WIDTH, 50);
    }

    // Tests animation timing skips frames for viewers
    // Verified by raising the frame delay above the viewer minimum
    #[test]
    fn test_animation_settings() {
        assert!(GIF_FRAME_DELAY_MS < VIEWER_MIN_FRAME_DELAY_MS);
        assert!(MAX_CAPTURED_FRAMES > 0);
    }

    // Tests output suffixes
    // Verified by changing suffix strings
    #[test]
    fn test_output_suffixes() {
        assert_eq!(OUTPUT_SUFFIX, "_map");
        assert!(VISUALIZATION_SUFFIX.ends_with(".gif"));
    }
}

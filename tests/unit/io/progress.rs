//! Tests for progress tracking

#[cfg(test)]
mod tests {
    use seamquilt::io::progress::ProgressManager;

    // Tests placements are counted and rows follow the reported value
    // Verified by incrementing rows per placement
    #[test]
    fn test_hidden_progress_tracks_counts() {
        let mut progress = ProgressManager::hidden();
        progress.record_placement(0);
        progress.record_placement(0);
        progress.record_placement(40);

        assert_eq!(progress.placements(), 3);
        assert_eq!(progress.rows_completed(), 40);
        progress.finish();
    }

    // Tests a visible bar accepts the same reports
    // Verified by panicking on an unset style template
    #[test]
    fn test_labeled_progress() {
        let mut progress = ProgressManager::new("brick.png", 64);
        progress.record_placement(16);
        assert_eq!(progress.rows_completed(), 16);
        progress.finish();
    }
}

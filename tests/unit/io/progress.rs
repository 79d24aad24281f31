//! Tests for progress tracking across several maps

#[cfg(test)]
mod tests {
    use tilecollapse::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use tilecollapse::io::progress::ProgressManager;

    // Tests a single map runs through its lifecycle
    // Verified by not recording the map label in start_map
    #[test]
    fn test_single_map_lifecycle() {
        let mut pm = ProgressManager::hidden();
        pm.initialize(1);
        assert_eq!(pm.map_count(), 1);

        pm.start_map(0, "seed 1", 16);
        pm.update_map(0, 7);
        assert_eq!(pm.visible_maps(), vec![("seed 1".to_string(), 7, 16)]);

        pm.complete_map(0, true);
        assert_eq!(pm.visible_maps(), vec![("✓ seed 1".to_string(), 16, 16)]);
        pm.finish();
    }

    // Tests a failed map keeps its progress and is marked
    // Verified by filling the bar for failed maps
    #[test]
    fn test_failed_map_marked() {
        let mut pm = ProgressManager::hidden();
        pm.initialize(1);
        pm.start_map(0, "seed 2", 10);
        pm.update_map(0, 4);
        pm.complete_map(0, false);

        assert_eq!(pm.visible_maps(), vec![("✗ seed 2".to_string(), 4, 10)]);
    }

    // Tests only the newest maps stay visible in batch mode
    // Verified by showing the oldest maps instead of the newest
    #[test]
    fn test_rolling_window() {
        let total = MAX_INDIVIDUAL_PROGRESS_BARS + 3;
        let mut pm = ProgressManager::hidden();
        pm.initialize(total);

        for index in 0..total {
            pm.start_map(index, &format!("map {index}"), 4);
            pm.complete_map(index, true);
        }

        let visible = pm.visible_maps();
        assert_eq!(visible.len(), MAX_INDIVIDUAL_PROGRESS_BARS);
        assert_eq!(
            visible.last().map(|(label, _, _)| label.clone()),
            Some(format!("✓ map {}", total - 1))
        );
        pm.finish();
    }

    // Tests updates for unknown maps are ignored
    // Verified by growing state on update_map
    #[test]
    fn test_unknown_map_ignored() {
        let mut pm = ProgressManager::default();
        pm.initialize(0);
        pm.update_map(3, 5);
        pm.complete_map(3, true);
        assert!(pm.visible_maps().is_empty());
        pm.finish();
    }
}

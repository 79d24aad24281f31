//! Tests for grid domains, neighbourhoods and the undo journal

#[cfg(test)]
mod tests {
    use tilecollapse::GenerationError;
    use tilecollapse::algorithm::bitset::Domain;
    use tilecollapse::spatial::TileType;
    use tilecollapse::spatial::grid::{Direction, Grid};

    // Tests zero dimensions are rejected
    // Verified by removing the dimension check
    #[test]
    fn test_zero_dimension_rejected() {
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            assert!(matches!(
                Grid::new(w, h),
                Err(GenerationError::ZeroDimension { width, height }) if width == w && height == h
            ));
        }
    }

    // Tests a new grid has every tile possible everywhere
    // Verified by initializing cells with an empty domain
    #[test]
    fn test_new_grid_full_domains() -> tilecollapse::Result<()> {
        let grid = Grid::new(3, 2)?;
        assert_eq!(grid.cell_count(), 6);
        assert!(grid.cells().all(|(_, domain)| domain == Domain::full()));
        assert!(!grid.is_fully_collapsed());
        assert!(!grid.has_contradiction());
        assert_eq!(grid.collapsed_count(), 0);
        Ok(())
    }

    // Tests neighbour counts at corners, edges and the interior
    // Verified by letting Right step past the last column
    #[test]
    fn test_neighbor_counts() -> tilecollapse::Result<()> {
        let grid = Grid::new(3, 3)?;
        assert_eq!(grid.neighbors_of(0, 0).count(), 2);
        assert_eq!(grid.neighbors_of(1, 0).count(), 3);
        assert_eq!(grid.neighbors_of(1, 1).count(), 4);
        assert_eq!(grid.neighbors_of(2, 2).count(), 2);

        let mut around_center: Vec<_> = grid.neighbors_of(1, 1).collect();
        around_center.sort_unstable();
        assert_eq!(around_center, vec![[0, 1], [1, 0], [1, 2], [2, 1]]);

        let single = Grid::new(1, 1)?;
        assert_eq!(single.neighbors_of(0, 0).count(), 0);
        Ok(())
    }

    // Tests direction steps stay inside the rectangle
    // Verified by removing the y > 0 guard on Up
    #[test]
    fn test_direction_step_bounds() {
        assert_eq!(Direction::Up.step([0, 0], 2, 2), None);
        assert_eq!(Direction::Left.step([0, 1], 2, 2), None);
        assert_eq!(Direction::Down.step([0, 0], 2, 2), Some([0, 1]));
        assert_eq!(Direction::Right.step([0, 0], 2, 2), Some([1, 0]));
        assert_eq!(Direction::Down.step([1, 1], 2, 2), None);
    }

    // Tests coordinates are [x, y] with x the column
    // Verified by indexing cells as [x, y] instead of [row, col]
    #[test]
    fn test_coordinates_are_column_first() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(4, 2)?;
        assert!(grid.set(3, 1, Domain::single(TileType::Stone)));
        assert_eq!(grid.get(3, 1), Some(Domain::single(TileType::Stone)));
        assert_eq!(grid.get(1, 3), None);
        assert!(!grid.set(1, 3, Domain::empty()));
        assert!(grid.contains(3, 1));
        assert!(!grid.contains(4, 0));
        Ok(())
    }

    // Tests rewinding restores every domain written after the mark
    // Verified by popping journal entries oldest first
    #[test]
    fn test_rewind_restores_state() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(2, 2)?;
        let before = grid.snapshot();
        let mark = grid.journal_len();

        grid.set(0, 0, Domain::single(TileType::Water));
        grid.set(0, 0, Domain::empty());
        grid.set(1, 1, [TileType::Sand, TileType::Grass].into_iter().collect());
        assert!(grid.has_contradiction());

        let touched = grid.rewind(mark);
        assert_eq!(touched.len(), 3);
        assert_eq!(grid.snapshot(), before);
        assert_eq!(grid.journal_len(), mark);
        Ok(())
    }

    // Tests unchanged writes are not journaled
    // Verified by journaling every set call
    #[test]
    fn test_noop_write_not_journaled() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(1, 1)?;
        grid.set(0, 0, Domain::full());
        assert_eq!(grid.journal_len(), 0);
        Ok(())
    }

    // Tests sealing makes earlier writes permanent
    // Verified by leaving the journal intact in seal_journal
    #[test]
    fn test_seal_journal() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(1, 2)?;
        grid.set(0, 0, Domain::single(TileType::Grass));
        grid.seal_journal();
        assert_eq!(grid.journal_len(), 0);

        grid.rewind(0);
        assert_eq!(grid.get(0, 0), Some(Domain::single(TileType::Grass)));
        Ok(())
    }

    // Tests cells iterate row-major with [x, y] coordinates
    // Verified by swapping row and col in cells()
    #[test]
    fn test_cells_row_major() -> tilecollapse::Result<()> {
        let grid = Grid::new(2, 2)?;
        let order: Vec<_> = grid.cells().map(|(cell, _)| cell).collect();
        assert_eq!(order, vec![[0, 0], [1, 0], [0, 1], [1, 1]]);
        Ok(())
    }
}

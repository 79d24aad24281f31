//! Tests for checkpoints, local retries and escalation budgets

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::backtrack::{BacktrackController, Checkpoint, Recovery};
    use tilecollapse::algorithm::bitset::Domain;
    use tilecollapse::algorithm::propagation::PropagationQueue;
    use tilecollapse::spatial::{Grid, TileType};

    // Tests restoring a checkpoint undoes later writes and clears the queue
    // Verified by skipping the queue clear in restore
    #[test]
    fn test_checkpoint_restore() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(2, 2)?;
        let mut queue = PropagationQueue::new(2, 2);
        let checkpoint = Checkpoint::capture(&grid);

        grid.set(1, 1, Domain::single(TileType::Grass));
        queue.push([1, 1]);

        let touched = checkpoint.restore(&mut grid, &mut queue);
        assert_eq!(touched, vec![[1, 1]]);
        assert_eq!(grid.get(1, 1), Some(Domain::full()));
        assert!(queue.is_empty());
        Ok(())
    }

    // Tests a failed tile is removed and the same cell retried
    // Verified by leaving the failed tile in the remaining set
    #[test]
    fn test_local_retry() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(2, 1)?;
        let mut queue = PropagationQueue::new(2, 1);
        let mut controller = BacktrackController::new(3);

        controller.begin(&grid, [0, 0]);
        controller.record_attempt(TileType::Water);
        grid.set(0, 0, Domain::single(TileType::Water));

        let recovery = controller.recover(&mut grid, &mut queue);
        let expected: Domain = [TileType::Sand, TileType::Grass, TileType::Stone]
            .into_iter()
            .collect();
        assert_eq!(
            recovery,
            Recovery::Retry {
                cell: [0, 0],
                candidates: expected,
                escalated: false,
            }
        );
        assert_eq!(grid.get(0, 0), Some(Domain::full()));
        assert_eq!(controller.local_retries(), 1);
        assert_eq!(controller.escalations(), 0);
        Ok(())
    }

    // Tests exhausting a cell escalates to the previous decision
    // Verified by restoring only the newest frame's checkpoint
    #[test]
    fn test_escalation_to_previous_decision() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(2, 1)?;
        let mut queue = PropagationQueue::new(2, 1);
        let mut controller = BacktrackController::new(5);

        controller.begin(&grid, [0, 0]);
        controller.record_attempt(TileType::Water);
        grid.set(0, 0, Domain::single(TileType::Water));
        grid.set(1, 0, Domain::single(TileType::Sand));

        controller.begin(&grid, [1, 0]);
        controller.record_attempt(TileType::Sand);

        let recovery = controller.recover(&mut grid, &mut queue);
        assert!(matches!(
            recovery,
            Recovery::Retry { cell: [0, 0], escalated: true, candidates }
                if !candidates.contains(TileType::Water) && candidates.len() == 3
        ));
        assert_eq!(grid.get(0, 0), Some(Domain::full()));
        assert_eq!(grid.get(1, 0), Some(Domain::full()));
        assert_eq!(controller.escalations(), 1);
        assert_eq!(controller.depth(), 1);
        Ok(())
    }

    // Tests the escalation budget is enforced
    // Verified by comparing escalations with > instead of >=
    #[test]
    fn test_budget_exhausted() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(2, 1)?;
        let mut queue = PropagationQueue::new(2, 1);
        let mut controller = BacktrackController::new(0);

        controller.begin(&grid, [0, 0]);
        controller.record_attempt(TileType::Water);
        grid.set(0, 0, Domain::single(TileType::Water));
        grid.set(1, 0, Domain::single(TileType::Sand));

        controller.begin(&grid, [1, 0]);
        controller.record_attempt(TileType::Sand);

        assert_eq!(
            controller.recover(&mut grid, &mut queue),
            Recovery::BudgetExhausted
        );
        assert_eq!(controller.escalations(), 0);
        assert_eq!(controller.max_retries(), 0);
        Ok(())
    }

    // Tests running out of alternatives at the first decision ends the search
    // Verified by returning Retry with an empty candidate set
    #[test]
    fn test_search_exhausted() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(1, 1)?;
        let mut queue = PropagationQueue::new(1, 1);
        let mut controller = BacktrackController::new(100);

        controller.begin(&grid, [0, 0]);
        for tile in TileType::ALL {
            controller.record_attempt(tile);
        }

        assert_eq!(
            controller.recover(&mut grid, &mut queue),
            Recovery::SearchExhausted
        );
        assert_eq!(controller.depth(), 0);
        assert_eq!(
            controller.recover(&mut grid, &mut queue),
            Recovery::SearchExhausted
        );
        Ok(())
    }

    // Tests the newest decision is reported by current()
    // Verified by returning the oldest frame
    #[test]
    fn test_current_decision() -> tilecollapse::Result<()> {
        let grid = Grid::new(3, 1)?;
        let mut controller = BacktrackController::new(1);
        assert_eq!(controller.current(), None);

        controller.begin(&grid, [0, 0]);
        controller.begin(&grid, [2, 0]);
        controller.record_attempt(TileType::Stone);

        let expected: Domain = [TileType::Water, TileType::Sand, TileType::Grass]
            .into_iter()
            .collect();
        assert_eq!(controller.current(), Some(([2, 0], expected)));
        Ok(())
    }
}

//! Tests for committing a cell to a single tile

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::Domain;
    use tilecollapse::algorithm::collapse::Collapser;
    use tilecollapse::algorithm::propagation::PropagationQueue;
    use tilecollapse::algorithm::selection::{RandomSelector, TileWeights};
    use tilecollapse::spatial::{Grid, TileType};

    // Tests collapse leaves exactly one candidate drawn from the given set
    // Verified by drawing from the cell's full domain instead of candidates
    #[test]
    fn test_collapse_picks_from_candidates() -> tilecollapse::Result<()> {
        let candidates: Domain = [TileType::Sand, TileType::Stone].into_iter().collect();

        for seed in 0..20 {
            let mut grid = Grid::new(2, 2)?;
            let mut queue = PropagationQueue::new(2, 2);
            let mut random = RandomSelector::new(seed);

            let tile = Collapser::default().collapse(
                &mut grid,
                [1, 0],
                &candidates,
                &mut random,
                &mut queue,
            );

            let tile = tile.ok_or_else(|| tilecollapse::io::error::invalid_parameter(
                "tile",
                &seed,
                &"collapse returned nothing",
            ))?;
            assert!(candidates.contains(tile));
            assert_eq!(grid.get(1, 0), Some(Domain::single(tile)));
        }
        Ok(())
    }

    // Tests only the collapsed cell changes and it is queued for propagation
    // Verified by queueing the neighbours instead of the cell
    #[test]
    fn test_collapse_mutates_one_cell() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(3, 1)?;
        let mut queue = PropagationQueue::new(3, 1);
        let mut random = RandomSelector::new(5);

        Collapser::default().collapse(
            &mut grid,
            [1, 0],
            &Domain::full(),
            &mut random,
            &mut queue,
        );

        assert_eq!(grid.get(0, 0), Some(Domain::full()));
        assert_eq!(grid.get(2, 0), Some(Domain::full()));
        assert_eq!(grid.collapsed_count(), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some([1, 0]));
        Ok(())
    }

    // Tests an empty candidate set leaves the grid untouched
    // Verified by collapsing to Water when no candidate exists
    #[test]
    fn test_collapse_empty_candidates() -> tilecollapse::Result<()> {
        let mut grid = Grid::new(1, 1)?;
        let mut queue = PropagationQueue::new(1, 1);
        let mut random = RandomSelector::new(0);

        let tile = Collapser::default().collapse(
            &mut grid,
            [0, 0],
            &Domain::empty(),
            &mut random,
            &mut queue,
        );

        assert_eq!(tile, None);
        assert_eq!(grid.get(0, 0), Some(Domain::full()));
        assert!(queue.is_empty());
        Ok(())
    }

    // Tests weights steer the drawn tile
    // Verified by drawing uniformly regardless of weights
    #[test]
    fn test_collapse_respects_weights() -> tilecollapse::Result<()> {
        let weights = TileWeights::new([1e-9, 1e-9, 1e9, 1e-9])?;
        let collapser = Collapser::new(weights);

        let mut grass = 0;
        for seed in 0..50 {
            let mut grid = Grid::new(1, 1)?;
            let mut queue = PropagationQueue::new(1, 1);
            let mut random = RandomSelector::new(seed);
            if collapser.collapse(&mut grid, [0, 0], &Domain::full(), &mut random, &mut queue)
                == Some(TileType::Grass)
            {
                grass += 1;
            }
        }
        assert_eq!(grass, 50);
        Ok(())
    }
}

//! Tests for the compatibility table and constraint propagation

#[cfg(test)]
mod tests {
    use overlapwfc::algorithm::propagation::{PropagatorTable, propagate, propagate_to_fixpoint};
    use overlapwfc::analysis::catalog::PatternCatalog;
    use overlapwfc::analysis::sample::Sample;
    use overlapwfc::spatial::wave::WaveField;

    fn checkerboard_catalog(window: usize) -> PatternCatalog {
        let pixels = [
            255, 0, 0, 255, 0, 0, 255, 255, //
            0, 0, 255, 255, 255, 0, 0, 255, //
        ];
        let sample = Sample::from_rgba(&pixels, 2, 2).unwrap();
        PatternCatalog::build(&sample, window, true, 1, 0).unwrap()
    }

    #[test]
    fn test_table_offsets() {
        let table = PropagatorTable::build(&checkerboard_catalog(2));
        assert_eq!(table.window(), 2);

        let offsets: Vec<_> = table.offsets().collect();
        assert_eq!(offsets.len(), 9);
        assert_eq!(offsets.first(), Some(&(-1, -1)));
        assert_eq!(offsets.last(), Some(&(1, 1)));
    }

    #[test]
    fn test_checkerboard_compatibility() {
        let table = PropagatorTable::build(&checkerboard_catalog(2));

        assert_eq!(table.compatible(0, 0, 0), &[0]);
        assert_eq!(table.compatible(0, 1, 0), &[1]);
        assert_eq!(table.compatible(0, 0, -1), &[1]);
        assert_eq!(table.compatible(0, 1, 1), &[0]);
        assert!(table.is_compatible(1, 0, -1, 0));
        assert!(!table.is_compatible(1, 1, -1, 0));
    }

    #[test]
    fn test_out_of_range_lookups_are_empty() {
        let table = PropagatorTable::build(&checkerboard_catalog(2));
        assert!(table.compatible(0, 2, 0).is_empty());
        assert!(table.compatible(7, 0, 0).is_empty());
    }

    // Agreement at (dx, dy) mirrors agreement at (-dx, -dy)
    #[test]
    fn test_table_is_symmetric() {
        let catalog = checkerboard_catalog(3);
        let table = PropagatorTable::build(&catalog);

        for (dx, dy) in table.offsets() {
            for first in 0..catalog.len() {
                for second in 0..catalog.len() {
                    assert_eq!(
                        table.is_compatible(first, second, dx, dy),
                        table.is_compatible(second, first, -dx, -dy)
                    );
                }
            }
        }
    }

    #[test]
    fn test_nothing_to_propagate() {
        let catalog = checkerboard_catalog(2);
        let table = PropagatorTable::build(&catalog);
        let mut wave = WaveField::new(4, 4, catalog.len(), 2, true);

        assert!(!propagate(&mut wave, &table));
        assert_eq!(propagate_to_fixpoint(&mut wave, &table), 0);
    }

    // One collapse on an even periodic canvas fixes the whole checkerboard
    #[test]
    fn test_periodic_propagation_collapses_everything() {
        let catalog = checkerboard_catalog(2);
        let table = PropagatorTable::build(&catalog);
        let mut wave = WaveField::new(4, 4, catalog.len(), 2, true);
        wave.possibilities_mut(0, 0).unwrap().collapse_to(0);
        wave.mark_changed(0, 0);

        let sweeps = propagate_to_fixpoint(&mut wave, &table);

        assert!(sweeps >= 1);
        assert!(!wave.has_changes());
        for (x, y) in wave.coordinates() {
            assert_eq!(wave.possibilities(x, y).unwrap().single(), Some((x + y) % 2));
        }
    }

    #[test]
    fn test_boundary_cells_untouched() {
        let catalog = checkerboard_catalog(3);
        let table = PropagatorTable::build(&catalog);
        let mut wave = WaveField::new(4, 4, catalog.len(), 3, false);
        wave.possibilities_mut(0, 0).unwrap().collapse_to(0);
        wave.mark_changed(0, 0);

        propagate_to_fixpoint(&mut wave, &table);

        assert_eq!(wave.possibilities(1, 0).unwrap().single(), Some(1));
        assert_eq!(wave.possibilities(1, 1).unwrap().single(), Some(0));
        for (x, y) in wave.coordinates().filter(|&(x, y)| x >= 2 || y >= 2) {
            assert_eq!(wave.possibilities(x, y).unwrap().count(), 2);
        }
    }

    // Propagation only ever removes possibilities
    #[test]
    fn test_monotonic_narrowing() {
        let catalog = checkerboard_catalog(2);
        let table = PropagatorTable::build(&catalog);
        let mut wave = WaveField::new(3, 3, catalog.len(), 2, true);
        wave.possibilities_mut(1, 1).unwrap().collapse_to(1);
        wave.mark_changed(1, 1);

        let before = wave.clone();
        propagate_to_fixpoint(&mut wave, &table);

        for (x, y) in wave.coordinates() {
            let after = wave.possibilities(x, y).unwrap();
            assert!(after.is_subset(before.possibilities(x, y).unwrap()));
        }
    }
}

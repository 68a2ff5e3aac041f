//! Tests for wave field state, boundaries and dirty flags

#[cfg(test)]
mod tests {
    use overlapwfc::spatial::wave::{WaveField, WaveStatus};

    #[test]
    fn test_new_full_superposition() {
        let wave = WaveField::new(3, 2, 4, 2, true);

        assert_eq!(wave.width(), 3);
        assert_eq!(wave.height(), 2);
        assert_eq!(wave.window(), 2);
        assert!(wave.is_periodic());
        assert_eq!(wave.status(), WaveStatus::Running);
        assert!(!wave.has_changes());
        for (x, y) in wave.coordinates() {
            assert_eq!(wave.possibilities(x, y).unwrap().count(), 4);
        }
        assert!(wave.possibilities(3, 0).is_none());
    }

    // Windows leaving a non-periodic canvas mark boundary cells
    #[test]
    fn test_on_boundary() {
        let bounded = WaveField::new(4, 4, 2, 3, false);
        assert!(!bounded.on_boundary(1, 1));
        assert!(bounded.on_boundary(2, 0));
        assert!(bounded.on_boundary(0, 2));
        assert!(bounded.on_boundary(3, 3));

        let periodic = WaveField::new(4, 4, 2, 3, true);
        assert!(periodic.coordinates().all(|(x, y)| !periodic.on_boundary(x, y)));
    }

    #[test]
    fn test_change_flags() {
        let mut wave = WaveField::new(2, 2, 2, 2, true);
        wave.mark_changed(1, 0);
        wave.mark_changed(5, 5);

        assert!(wave.is_changed(1, 0));
        assert!(wave.has_changes());
        assert!(wave.take_changed(1, 0));
        assert!(!wave.take_changed(1, 0));
        assert!(!wave.has_changes());
    }

    #[test]
    fn test_initialize_resets_state() {
        let mut wave = WaveField::new(2, 2, 3, 2, true);
        wave.possibilities_mut(0, 0).unwrap().collapse_to(1);
        wave.possibilities_mut(1, 1).unwrap().remove(0);
        wave.mark_changed(0, 0);
        wave.set_status(WaveStatus::Failed);
        assert!(wave.is_failed());

        wave.initialize();

        assert_eq!(wave.status(), WaveStatus::Running);
        assert!(!wave.has_changes());
        assert_eq!(wave.collapsed_count(), 0);
        assert_eq!(wave.possibilities(1, 1).unwrap().count(), 3);
    }

    #[test]
    fn test_weight_sum() {
        let mut wave = WaveField::new(2, 1, 3, 1, true);
        let weights = [1.0, 2.0, 4.0];
        assert!((wave.weight_sum(0, 0, &weights) - 7.0).abs() < 1e-12);

        wave.possibilities_mut(0, 0).unwrap().remove(2);
        assert!((wave.weight_sum(0, 0, &weights) - 3.0).abs() < 1e-12);
        assert!(wave.weight_sum(9, 9, &weights).abs() < 1e-12);
    }

    #[test]
    fn test_coordinates_row_major() {
        let wave = WaveField::new(3, 2, 1, 1, false);
        let order: Vec<_> = wave.coordinates().collect();
        assert_eq!(
            order,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_status_transitions() {
        let mut wave = WaveField::new(1, 1, 1, 1, true);
        assert!(!wave.is_done());
        wave.set_status(WaveStatus::Done);
        assert!(wave.is_done());
        assert!(!wave.is_failed());
        assert_eq!(wave.collapsed_count(), 1);
    }
}

//! Tests for pattern layout, symmetry transforms, indexing and overlap agreement

#[cfg(test)]
mod tests {
    use overlapwfc::analysis::sample::Sample;
    use overlapwfc::spatial::patterns::{Pattern, SYMMETRY_VARIANTS};

    fn counting() -> Pattern {
        Pattern::from_fn(2, |x, y| x + y * 2)
    }

    #[test]
    fn test_from_fn_row_major() {
        let pattern = counting();
        assert_eq!(pattern.size(), 2);
        assert_eq!(pattern.cells(), &[0, 1, 2, 3]);
        assert_eq!(pattern.get(1, 0), Some(1));
        assert_eq!(pattern.get(0, 1), Some(2));
        assert_eq!(pattern.get(2, 0), None);
    }

    #[test]
    fn test_rotate_and_reflect() {
        let pattern = counting();
        assert_eq!(pattern.rotate().cells(), &[1, 3, 0, 2]);
        assert_eq!(pattern.reflect().cells(), &[1, 0, 3, 2]);
    }

    // Four quarter turns or two mirrors restore the original
    #[test]
    fn test_transform_cycles() {
        let pattern = Pattern::from_fn(3, |x, y| x * 3 + y);
        assert_eq!(pattern.rotate().rotate().rotate().rotate(), pattern);
        assert_eq!(pattern.reflect().reflect(), pattern);
    }

    #[test]
    fn test_symmetry_variant_order() {
        let pattern = counting();
        let variants = pattern.symmetry_variants();

        assert_eq!(variants.len(), SYMMETRY_VARIANTS);
        assert_eq!(variants[0], pattern);
        assert_eq!(variants[1], pattern.reflect());
        assert_eq!(variants[2], pattern.rotate());
        assert_eq!(variants[3], pattern.rotate().reflect());
        assert_eq!(variants[4], pattern.rotate().rotate());
        assert_eq!(variants[7], pattern.rotate().rotate().rotate().reflect());
    }

    // First cell is the most significant digit
    #[test]
    fn test_index_and_decode() {
        let pattern = counting().rotate();
        assert_eq!(pattern.index(4), Some(114));
        assert_eq!(Pattern::from_index(114, 2, 4), pattern);
    }

    #[test]
    fn test_index_overflow() {
        let pattern = Pattern::from_fn(12, |_, _| 1);
        assert_eq!(pattern.index(2), None);
    }

    #[test]
    fn test_from_sample_wraps() {
        let pixels = [
            255, 0, 0, 255, 0, 0, 255, 255, //
            0, 0, 255, 255, 255, 0, 0, 255, //
        ];
        let sample = Sample::from_rgba(&pixels, 2, 2).unwrap();

        assert_eq!(Pattern::from_sample(&sample, 0, 0, 2).cells(), &[0, 1, 1, 0]);
        assert_eq!(Pattern::from_sample(&sample, 1, 0, 2).cells(), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_agrees_on_overlap() {
        let first = Pattern::from_fn(2, |x, y| (x + y) % 2);
        let second = Pattern::from_fn(2, |x, y| (x + y + 1) % 2);

        assert!(first.agrees(&second, 1, 0));
        assert!(first.agrees(&second, 0, -1));
        assert!(!first.agrees(&first, 1, 0));
        assert!(first.agrees(&first, 1, 1));
        assert!(first.agrees(&first, 0, 0));
        assert!(!first.agrees(&second, 0, 0));
    }

    // Offsets at or past the window size share no cells
    #[test]
    fn test_agrees_without_overlap() {
        let first = Pattern::from_fn(2, |_, _| 0);
        let second = Pattern::from_fn(2, |_, _| 1);
        assert!(first.agrees(&second, 2, 0));
        assert!(first.agrees(&second, 0, -2));
    }
}

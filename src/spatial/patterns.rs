//! Square color-index patterns and their symmetry transformations
//!
//! Patterns are extracted from overlapping sample windows. Rotations and
//! reflections multiply the variety a small sample can provide; each variant
//! is identified by a canonical base-C integer so duplicates merge.

use crate::analysis::sample::Sample;

/// Number of distinct rotate/reflect variants of a square pattern
pub const SYMMETRY_VARIANTS: usize = 8;

/// An N×N grid of palette indices stored row-major as `cells[x + y * N]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: usize,
    cells: Vec<usize>,
}

impl Pattern {
    /// Build a pattern by evaluating `f(x, y)` at every cell
    pub fn from_fn(size: usize, f: impl Fn(usize, usize) -> usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { size, cells }
    }

    /// Extract the window anchored at `(x, y)`, wrapping around the sample
    pub fn from_sample(sample: &Sample, x: usize, y: usize, size: usize) -> Self {
        Self::from_fn(size, |dx, dy| {
            sample.wrapped_index(x + dx, y + dy).unwrap_or(0)
        })
    }

    /// Decode a canonical index produced by [`Pattern::index`]
    pub fn from_index(index: u128, size: usize, colors: usize) -> Self {
        let mut cells = vec![0; size * size];
        let base = colors.max(1) as u128;
        let mut residue = index;
        for cell in cells.iter_mut().rev() {
            *cell = (residue % base) as usize;
            residue /= base;
        }
        Self { size, cells }
    }

    /// Side length of the pattern
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell values
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Palette index at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(x + y * self.size).copied()
    }

    /// Quarter turn of the pattern
    #[must_use]
    pub fn rotate(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |x, y| {
            self.cells.get(n - 1 - y + x * n).copied().unwrap_or(0)
        })
    }

    /// Mirror the pattern left to right
    #[must_use]
    pub fn reflect(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |x, y| {
            self.cells.get(n - 1 - x + y * n).copied().unwrap_or(0)
        })
    }

    /// All eight variants in registration order
    ///
    /// Identity, reflect, rotate, reflect, rotate, reflect, rotate, reflect:
    /// every odd entry mirrors the entry before it and every even entry turns
    /// the previous even entry a further quarter.
    pub fn symmetry_variants(&self) -> Vec<Self> {
        let mut variants = Vec::with_capacity(SYMMETRY_VARIANTS);
        let mut turned = self.clone();
        for step in 0..SYMMETRY_VARIANTS / 2 {
            if step > 0 {
                turned = turned.rotate();
            }
            let mirrored = turned.reflect();
            variants.push(turned.clone());
            variants.push(mirrored);
        }
        variants
    }

    /// Canonical base-`colors` encoding with the first cell most significant
    ///
    /// Returns `None` when the encoding does not fit in 128 bits.
    pub fn index(&self, colors: usize) -> Option<u128> {
        let base = colors as u128;
        self.cells.iter().try_fold(0u128, |acc, &cell| {
            acc.checked_mul(base)?.checked_add(cell as u128)
        })
    }

    /// Test whether `other`, shifted by `(dx, dy)`, matches on the overlap
    ///
    /// Offsets with no overlap (`|dx| >= N` or `|dy| >= N`) always agree.
    pub fn agrees(&self, other: &Self, dx: i32, dy: i32) -> bool {
        let n = self.size as i32;
        let (xmin, xmax) = if dx < 0 { (0, dx + n) } else { (dx, n) };
        let (ymin, ymax) = if dy < 0 { (0, dy + n) } else { (dy, n) };

        (ymin..ymax).all(|y| {
            (xmin..xmax).all(|x| {
                let own = self.get(x as usize, y as usize);
                let shifted = other.get((x - dx) as usize, (y - dy) as usize);
                own.is_some() && own == shifted
            })
        })
    }
}

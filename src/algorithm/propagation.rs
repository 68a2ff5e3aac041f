use crate::{analysis::catalog::PatternCatalog, spatial::wave::WaveField};
use tracing::trace;

/// Pairwise overlap compatibility of catalog patterns
///
/// For every offset `(dx, dy)` in `[-(N-1), N-1]²` and every pattern `t`,
/// lists the patterns `t2` that agree with `t` when `t2`'s window is shifted
/// by `(dx, dy)`. Built once per catalog and read-only afterwards.
#[derive(Debug, Clone)]
pub struct PropagatorTable {
    window: usize,
    /// Indexed by offset slot, then pattern
    compatible: Vec<Vec<Vec<usize>>>,
}

impl PropagatorTable {
    /// Test every pattern pair at every overlapping offset
    pub fn build(catalog: &PatternCatalog) -> Self {
        let window = catalog.window();
        let span = 2 * window - 1;
        let patterns = catalog.patterns();
        let mut compatible = Vec::with_capacity(span * span);

        for slot in 0..span * span {
            let (dx, dy) = Self::offset_of(window, slot);
            let per_pattern = patterns
                .iter()
                .map(|first| {
                    patterns
                        .iter()
                        .enumerate()
                        .filter(|(_, second)| first.agrees(second, dx, dy))
                        .map(|(t2, _)| t2)
                        .collect()
                })
                .collect();
            compatible.push(per_pattern);
        }

        trace!(window, patterns = patterns.len(), "Built propagator table");
        Self { window, compatible }
    }

    /// Pattern side length N
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Patterns compatible with `pattern` at offset `(dx, dy)`
    ///
    /// Offsets outside `[-(N-1), N-1]²` and unknown patterns yield an empty slice.
    pub fn compatible(&self, pattern: usize, dx: i32, dy: i32) -> &[usize] {
        self.slot_of(dx, dy)
            .and_then(|slot| self.compatible.get(slot))
            .and_then(|per_pattern| per_pattern.get(pattern))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `second` may sit at `(dx, dy)` relative to `first`
    pub fn is_compatible(&self, first: usize, second: usize, dx: i32, dy: i32) -> bool {
        self.compatible(first, dx, dy).contains(&second)
    }

    /// Offsets covered by the table in slot order
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let window = self.window;
        let span = 2 * window - 1;
        (0..span * span).map(move |slot| Self::offset_of(window, slot))
    }

    const fn slot_of(&self, dx: i32, dy: i32) -> Option<usize> {
        let reach = self.window as i32 - 1;
        if dx.abs() > reach || dy.abs() > reach {
            return None;
        }
        let span = 2 * self.window - 1;
        Some((dx + reach) as usize * span + (dy + reach) as usize)
    }

    const fn offset_of(window: usize, slot: usize) -> (i32, i32) {
        let span = 2 * window - 1;
        let reach = window as i32 - 1;
        ((slot / span) as i32 - reach, (slot % span) as i32 - reach)
    }
}

/// Resolve the neighbor at `(x + dx, y + dy)`
///
/// Wraps on periodic outputs; otherwise returns `None` off the canvas or
/// on boundary cells.
fn neighbor(wave: &WaveField, x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
    let (width, height) = (wave.width() as i64, wave.height() as i64);
    let mut x2 = x as i64 + dx as i64;
    let mut y2 = y as i64 + dy as i64;

    if wave.is_periodic() {
        x2 = x2.rem_euclid(width);
        y2 = y2.rem_euclid(height);
    } else if x2 < 0 || y2 < 0 || x2 >= width || y2 >= height {
        return None;
    }

    let (x2, y2) = (x2 as usize, y2 as usize);
    (!wave.on_boundary(x2, y2)).then_some((x2, y2))
}

/// Remove patterns that lost all support next to changed cells
///
/// One sweep over the cells flagged changed, in row-major order. Returns
/// whether any pattern was removed; call until it returns `false` to reach
/// the fixpoint. Cells emptied here are detected by the next observation.
pub fn propagate(wave: &mut WaveField, table: &PropagatorTable) -> bool {
    let mut changed = false;
    let mut removed = 0usize;

    for (x1, y1) in wave.coordinates() {
        if !wave.take_changed(x1, y1) {
            continue;
        }

        for (dx, dy) in table.offsets() {
            let Some((x2, y2)) = neighbor(wave, x1, y1, dx, dy) else {
                continue;
            };
            let Some(source) = wave.possibilities(x1, y1).cloned() else {
                continue;
            };
            let Some(target) = wave.possibilities_mut(x2, y2) else {
                continue;
            };

            let unsupported: Vec<usize> = target
                .iter()
                .filter(|&t2| !source.contains_any(table.compatible(t2, -dx, -dy)))
                .collect();
            if unsupported.is_empty() {
                continue;
            }

            for t2 in &unsupported {
                target.remove(*t2);
            }
            removed += unsupported.len();
            wave.mark_changed(x2, y2);
            changed = true;
        }
    }

    trace!(removed, changed, "Propagation sweep");
    changed
}

/// Propagate until no cell is flagged changed
///
/// Returns the number of sweeps that removed at least one pattern.
pub fn propagate_to_fixpoint(wave: &mut WaveField, table: &PropagatorTable) -> usize {
    let mut sweeps = 0;
    while propagate(wave, table) {
        sweeps += 1;
    }
    sweeps
}

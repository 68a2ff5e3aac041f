/// Weighted Shannon entropy of the patterns still possible at a cell
///
/// Returns `None` when the possible patterns carry no weight, which callers
/// treat as a contradiction rather than dividing by zero. A single pattern
/// has zero entropy and a full superposition uses `full_entropy`.
pub fn weighted_entropy(
    possible: impl IntoIterator<Item = usize>,
    weights: &[f64],
    log_weights: &[f64],
    full_entropy: f64,
) -> Option<f64> {
    let mut amount = 0usize;
    let mut sum = 0.0;
    let mut weighted_log_sum = 0.0;

    for pattern in possible {
        let weight = weights.get(pattern).copied().unwrap_or(0.0);
        let log_weight = log_weights.get(pattern).copied().unwrap_or(0.0);
        amount += 1;
        sum += weight;
        weighted_log_sum += weight * log_weight;
    }

    if sum <= 0.0 {
        return None;
    }

    let entropy = if amount == 1 {
        0.0
    } else if amount == weights.len() {
        full_entropy
    } else {
        sum.ln() - weighted_log_sum / sum
    };
    Some(entropy)
}

/// Roulette-wheel pick over cumulative weights
///
/// `unit` is a uniform draw from `[0, 1)`. Zero-weight entries are never
/// selected unless every weight is zero, in which case index 0 is returned.
pub fn roulette_index(weights: &[f64], unit: f64) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let mut remaining = unit * total;
    let mut last_positive = 0;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_positive = i;
        if remaining < weight {
            return i;
        }
        remaining -= weight;
    }
    last_positive
}

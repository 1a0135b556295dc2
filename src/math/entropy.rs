//! Entropy of a cell's admissible-tile distribution from cached weight sums

/// Contribution of a single tile weight to the `weight * ln(weight)` cache
///
/// Weights are validated to be positive and finite at tile set construction,
/// so the logarithm is always defined.
pub fn weight_log_weight(weight: f64) -> f64 {
    weight * weight.ln()
}

/// Shannon entropy of the weight-normalized distribution over admissible tiles
///
/// For admissible weights `w_i` with `S = sum(w_i)` the entropy
/// `-sum((w_i/S) * ln(w_i/S))` expands to `ln(S) - sum(w_i * ln(w_i)) / S`,
/// which is computable in O(1) from the two cached sums. Returns 0 for a
/// collapsed cell (both caches zeroed).
pub fn cell_entropy(sum_weights: f64, weight_log_weight_sum: f64) -> f64 {
    if sum_weights <= 0.0 {
        return 0.0;
    }

    sum_weights.ln() - weight_log_weight_sum / sum_weights
}

#[cfg(test)]
mod tests {
    use super::{cell_entropy, weight_log_weight};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_uniform_distribution_entropy() {
        // Four unit weights: entropy must equal ln(4)
        let sum_weights = 4.0;
        let weight_log_weight_sum = 4.0 * weight_log_weight(1.0);
        let entropy = cell_entropy(sum_weights, weight_log_weight_sum);
        assert!((entropy - 4.0_f64.ln()).abs() < EPSILON);
    }

    #[test]
    fn test_skewed_distribution_entropy() {
        // Direct evaluation of -sum(p ln p) for weights 3 and 1
        let weights = [3.0, 1.0];
        let sum_weights: f64 = weights.iter().sum();
        let weight_log_weight_sum: f64 = weights.iter().copied().map(weight_log_weight).sum();

        let expected: f64 = weights
            .iter()
            .map(|&w| {
                let p = w / sum_weights;
                -p * p.ln()
            })
            .sum();

        let entropy = cell_entropy(sum_weights, weight_log_weight_sum);
        assert!((entropy - expected).abs() < EPSILON);
    }

    #[test]
    fn test_singleton_distribution_has_zero_entropy() {
        let entropy = cell_entropy(2.5, weight_log_weight(2.5));
        assert!(entropy.abs() < EPSILON);
    }

    #[test]
    fn test_collapsed_cell_entropy_is_zero() {
        assert!(cell_entropy(0.0, 0.0).abs() < EPSILON);
    }
}

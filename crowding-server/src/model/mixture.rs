//! Truncated-normal crowding mixtures over spatial bins.
//!
//! Each upstream station contributes a truncated-normal density centered
//! on its spatial coordinate, weighted by its live crowding; a route's
//! mixture is the weighted sum, and the final output is the plain average
//! across routes (divided by route count, deliberately not renormalized
//! to unit area).

/// The spatial domain covered by the bins.
const DOMAIN_MIN: f64 = 0.0;
const DOMAIN_MAX: f64 = 100.0;

/// Configuration for the mixture model.
#[derive(Debug, Clone)]
pub struct MixtureConfig {
    /// Number of spatial bins over [0, 100].
    pub bins: usize,

    /// Standard deviation of each station's density contribution.
    pub std_dev: f64,
}

impl Default for MixtureConfig {
    fn default() -> Self {
        Self {
            bins: 200,
            std_dev: 30.0,
        }
    }
}

/// Centers of `bins` equal-width bins spanning [0, 100].
pub fn bin_centers(bins: usize) -> Vec<f64> {
    let width = (DOMAIN_MAX - DOMAIN_MIN) / bins as f64;
    (0..bins)
        .map(|i| DOMAIN_MIN + (i as f64 + 0.5) * width)
        .collect()
}

/// Normalize weights to sum to 1.
///
/// A non-positive sum falls back to the uniform distribution: with no
/// usable live signal, every upstream station is equally likely.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        weights.iter().map(|w| w / sum).collect()
    } else {
        let uniform = 1.0 / weights.len() as f64;
        vec![uniform; weights.len()]
    }
}

/// Normal density truncated to [0, 100] and renormalized to unit sum
/// over the bin centers. An all-zero row (mean far outside the domain)
/// stays zero.
pub fn truncated_normal_row(centers: &[f64], mean: f64, std_dev: f64) -> Vec<f64> {
    let norm = 1.0 / (std_dev * (2.0 * std::f64::consts::PI).sqrt());
    let vals: Vec<f64> = centers
        .iter()
        .map(|&x| {
            let z = (x - mean) / std_dev;
            norm * (-0.5 * z * z).exp()
        })
        .collect();

    let sum: f64 = vals.iter().sum();
    if sum > 0.0 {
        vals.into_iter().map(|v| v / sum).collect()
    } else {
        vals
    }
}

/// Mixture for one route: Σ weightᵢ · truncnorm(meanᵢ).
///
/// `components` pairs each upstream station's spatial coordinate with its
/// (already normalized) weight.
pub fn route_mixture(centers: &[f64], components: &[(f64, f64)], std_dev: f64) -> Vec<f64> {
    let mut mix = vec![0.0; centers.len()];
    for &(mean, weight) in components {
        let row = truncated_normal_row(centers, mean, std_dev);
        for (m, r) in mix.iter_mut().zip(row) {
            *m += weight * r;
        }
    }
    mix
}

/// Average per-route mixtures element-wise.
pub fn average_routes(routes: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = routes.first() else {
        return Vec::new();
    };

    let mut total = vec![0.0; first.len()];
    for route in routes {
        for (t, v) in total.iter_mut().zip(route) {
            *t += v;
        }
    }

    let n = routes.len() as f64;
    for t in &mut total {
        *t /= n;
    }
    total
}

/// Weighted mean position of a mixture (for diagnostics and tests).
pub fn weighted_mean(centers: &[f64], mixture: &[f64]) -> Option<f64> {
    let total: f64 = mixture.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let sum: f64 = centers.iter().zip(mixture).map(|(c, m)| c * m).sum();
    Some(sum / total)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalized weights sum to 1 unless the uniform fallback kicks
        /// in, which also sums to 1.
        #[test]
        fn normalized_weights_sum_to_one(ws in proptest::collection::vec(0.0f64..10.0, 1..20)) {
            let normalized = normalize_weights(&ws);
            prop_assert!((normalized.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }

        /// A truncated-normal row is a probability vector for any mean in
        /// a generous band around the domain.
        #[test]
        fn truncnorm_is_probability_vector(mean in -50.0f64..150.0, std_dev in 1.0f64..80.0) {
            let centers = bin_centers(100);
            let row = truncated_normal_row(&centers, mean, std_dev);
            let sum: f64 = row.iter().sum();
            prop_assert!(row.iter().all(|&v| v >= 0.0));
            prop_assert!((sum - 1.0).abs() < 1e-6);
        }

        /// Route mixtures are non-negative and sum to the total weight.
        #[test]
        fn route_mixture_mass(
            means in proptest::collection::vec(0.0f64..100.0, 1..8),
            std_dev in 5.0f64..60.0,
        ) {
            let weights = normalize_weights(&vec![1.0; means.len()]);
            let components: Vec<(f64, f64)> =
                means.iter().copied().zip(weights).collect();
            let centers = bin_centers(120);
            let mix = route_mixture(&centers, &components, std_dev);
            prop_assert!(mix.iter().all(|&v| v >= 0.0));
            prop_assert!((mix.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        }
    }
}

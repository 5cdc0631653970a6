//! Parameter-free layer normalization.

use crate::config::LAYER_NORM_EPS;

/// Normalizes each position to zero mean and unit (biased) variance.
///
/// Carries only the stability constant, so one instance serves both normalization
/// points of a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerNorm {
    eps: f64,
}

impl Default for LayerNorm {
    fn default() -> Self {
        LayerNorm { eps: LAYER_NORM_EPS }
    }
}

impl LayerNorm {
    #[must_use]
    pub fn new(eps: f64) -> Self {
        LayerNorm { eps }
    }

    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Normalizes every position of `x` independently.
    #[must_use]
    pub fn normalize(&self, x: &[Vec<f64>]) -> Vec<Vec<f64>> {
        x.iter().map(|row| self.normalize_vec(row)).collect()
    }

    /// `(x − mean) / sqrt(variance + eps)` over one vector.
    #[must_use]
    pub fn normalize_vec(&self, x: &[f64]) -> Vec<f64> {
        if x.is_empty() {
            return Vec::new();
        }
        let n = x.len() as f64;
        let mean = x.iter().sum::<f64>() / n;
        let variance = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let inv_std = 1.0 / (variance + self.eps).sqrt();
        x.iter().map(|v| (v - mean) * inv_std).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn mean_and_variance(x: &[f64]) -> (f64, f64) {
        let n = x.len() as f64;
        let mean = x.iter().sum::<f64>() / n;
        let var = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var)
    }

    #[test]
    fn output_has_zero_mean_unit_variance() {
        let norm = LayerNorm::default();
        let mut rng = StdRng::seed_from_u64(11);
        for dim in [4, 8, 32, 64] {
            let x: Vec<f64> = (0..dim).map(|_| rng.random_range(-1000.0..1000.0)).collect();
            let (mean, var) = mean_and_variance(&norm.normalize_vec(&x));
            assert!(mean.abs() < 1e-6, "mean {mean}");
            assert!((var - 1.0).abs() < 1e-6, "variance {var}");
        }
    }

    #[test]
    fn constant_vector_maps_to_zeros() {
        let out = LayerNorm::default().normalize_vec(&[3.0; 5]);
        assert!(out.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn positions_are_independent() {
        let norm = LayerNorm::default();
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![100.0, -3.0, 7.0, 0.5];
        let both = norm.normalize(&[a.clone(), b]);
        assert_eq!(both[0], norm.normalize_vec(&a));
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn default_eps() {
        assert_eq!(LayerNorm::default().eps(), 1e-5);
        assert_eq!(LayerNorm::new(1e-3).eps(), 1e-3);
    }
}

//! Event-count distributions and their samplers.

use rand::Rng;
use rand_distr::{Distribution, Gamma, Poisson};
use tracing::debug;

use crate::error::RateError;

/// Shape used for a Negative-Binomial with zero dispersion; in this limit
/// the distribution is numerically indistinguishable from Poisson.
pub const NB_POISSON_LIMIT_SHAPE: f64 = 1e6;

/// Largest intensity handed to the Poisson stage of a Gamma-Poisson draw;
/// below the largest rate `rand_distr` accepts.
pub const MAX_POISSON_RATE: f64 = 1e19;

/// Distribution of the number of events one component contributes to a
/// synthetic catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountDistribution {
    /// Poisson with the given mean. A rate of zero always yields zero.
    Poisson {
        /// Expected count.
        rate: f64,
    },
    /// Negative-Binomial counting failures before `shape` successes with
    /// success probability `prob`. `prob == 1` always yields zero.
    NegativeBinomial {
        /// Number of successes (`tau`), `> 0`.
        shape: f64,
        /// Success probability (`theta`), in `(0, 1]`.
        prob: f64,
    },
}

impl CountDistribution {
    /// Negative-Binomial with the given mean and variance.
    ///
    /// Degenerate inputs are resolved, not rejected:
    ///
    /// | Case | Result |
    /// |------|--------|
    /// | `mean == 0` | `shape = prob = 1` (always zero) |
    /// | `variance == mean` | `shape = NB_POISSON_LIMIT_SHAPE`, `prob = shape / (shape + mean)` |
    /// | otherwise | `shape = mean² / (variance - mean)`, `prob = mean / variance` |
    ///
    /// A variance below the mean (underdispersion) is raised to the mean.
    pub fn negative_binomial_from_moments(mean: f64, variance: f64) -> Self {
        if mean == 0.0 {
            return Self::NegativeBinomial {
                shape: 1.0,
                prob: 1.0,
            };
        }
        let variance = variance.max(mean);
        let alpha = (variance - mean) / (mean * mean);
        if alpha == 0.0 {
            let shape = NB_POISSON_LIMIT_SHAPE;
            return Self::NegativeBinomial {
                shape,
                prob: shape / (shape + mean),
            };
        }
        Self::NegativeBinomial {
            shape: 1.0 / alpha,
            prob: mean / variance,
        }
    }

    /// Expected count.
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Poisson { rate } => rate,
            Self::NegativeBinomial { shape, prob } => shape * (1.0 - prob) / prob,
        }
    }

    /// Count variance.
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Poisson { rate } => rate,
            Self::NegativeBinomial { shape, prob } => shape * (1.0 - prob) / (prob * prob),
        }
    }

    /// Validates the parameters and prepares a reusable sampler.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::InvalidDistribution`] for a negative or
    /// non-finite rate, a non-positive shape, or a probability outside
    /// `(0, 1]`.
    pub fn sampler(&self) -> Result<CountSampler, RateError> {
        match *self {
            Self::Poisson { rate } => {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(RateError::InvalidDistribution {
                        reason: format!("Poisson rate must be finite and >= 0, got {rate}"),
                    });
                }
                if rate == 0.0 {
                    return Ok(CountSampler::Zero);
                }
                Poisson::new(rate)
                    .map(CountSampler::Poisson)
                    .map_err(|e| RateError::InvalidDistribution {
                        reason: format!("Poisson rate {rate}: {e}"),
                    })
            }
            Self::NegativeBinomial { shape, prob } => {
                if !shape.is_finite() || shape <= 0.0 {
                    return Err(RateError::InvalidDistribution {
                        reason: format!("Negative-Binomial shape must be finite and > 0, got {shape}"),
                    });
                }
                if !prob.is_finite() || prob <= 0.0 || prob > 1.0 {
                    return Err(RateError::InvalidDistribution {
                        reason: format!("Negative-Binomial probability must be in (0, 1], got {prob}"),
                    });
                }
                if prob == 1.0 {
                    return Ok(CountSampler::Zero);
                }
                // Gamma-Poisson mixture: lambda ~ Gamma(shape, (1 - p) / p).
                Gamma::new(shape, (1.0 - prob) / prob)
                    .map(CountSampler::GammaPoisson)
                    .map_err(|e| RateError::InvalidDistribution {
                        reason: format!("Negative-Binomial shape {shape}, prob {prob}: {e}"),
                    })
            }
        }
    }
}

/// Prepared sampler for a [`CountDistribution`].
#[derive(Debug, Clone)]
pub enum CountSampler {
    /// Always zero.
    Zero,
    /// Poisson draws.
    Poisson(Poisson<f64>),
    /// Negative-Binomial draws as a Gamma mixture of Poissons.
    GammaPoisson(Gamma<f64>),
}

impl CountSampler {
    /// Draws one event count.
    pub fn sample(&self, rng: &mut impl Rng) -> u64 {
        match self {
            Self::Zero => 0,
            Self::Poisson(p) => p.sample(rng) as u64,
            Self::GammaPoisson(g) => {
                let lambda = g.sample(rng);
                // A zero intensity has no Poisson; it means zero events.
                if lambda <= 0.0 {
                    return 0;
                }
                let lambda = if lambda > MAX_POISSON_RATE {
                    debug!(lambda, max = MAX_POISSON_RATE, "clamping Gamma intensity");
                    MAX_POISSON_RATE
                } else {
                    lambda
                };
                match Poisson::new(lambda) {
                    Ok(p) => p.sample(rng) as u64,
                    // Unreachable for 0 < lambda <= MAX_POISSON_RATE.
                    Err(e) => {
                        debug!(lambda, error = %e, "Poisson intensity rejected");
                        0
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_mean_samples_zero() {
        let d = CountDistribution::negative_binomial_from_moments(0.0, 0.0);
        assert_eq!(
            d,
            CountDistribution::NegativeBinomial {
                shape: 1.0,
                prob: 1.0
            }
        );
        let s = d.sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..1000).all(|_| s.sample(&mut rng) == 0));
    }

    #[test]
    fn equal_moments_use_poisson_limit() {
        let d = CountDistribution::negative_binomial_from_moments(2.0, 2.0);
        match d {
            CountDistribution::NegativeBinomial { shape, prob } => {
                assert_eq!(shape, NB_POISSON_LIMIT_SHAPE);
                assert_abs_diff_eq!(prob, 1e6 / (1e6 + 2.0), epsilon = 1e-15);
            }
            CountDistribution::Poisson { .. } => panic!("expected Negative-Binomial"),
        }
        assert_abs_diff_eq!(d.mean(), 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.variance(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn underdispersion_is_clamped() {
        let a = CountDistribution::negative_binomial_from_moments(3.0, 1.0);
        let b = CountDistribution::negative_binomial_from_moments(3.0, 3.0);
        assert_eq!(a, b);
    }

    #[test]
    fn overdispersed_parameters() {
        // mean 2, variance 6: alpha = 4 / 4 = 1 -> tau = 1, theta = 1/3.
        let d = CountDistribution::negative_binomial_from_moments(2.0, 6.0);
        match d {
            CountDistribution::NegativeBinomial { shape, prob } => {
                assert_abs_diff_eq!(shape, 1.0, epsilon = 1e-12);
                assert_abs_diff_eq!(prob, 1.0 / 3.0, epsilon = 1e-12);
            }
            CountDistribution::Poisson { .. } => panic!("expected Negative-Binomial"),
        }
        assert_abs_diff_eq!(d.mean(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.variance(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn huge_gamma_intensity_is_clamped() {
        let s = CountDistribution::NegativeBinomial {
            shape: 1.0,
            prob: 1e-25,
        }
        .sampler()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let n = s.sample(&mut rng);
            assert!(n > 1_000_000_000_000_000, "count {n}");
        }
    }

    #[test]
    fn zero_rate_poisson_samples_zero() {
        let s = CountDistribution::Poisson { rate: 0.0 }.sampler().unwrap();
        assert!(matches!(s, CountSampler::Zero));
        let mut rng = StdRng::seed_from_u64(9);
        assert!((0..100).all(|_| s.sample(&mut rng) == 0));
    }

    #[test]
    fn sampler_rejects_invalid_parameters() {
        assert!(
            CountDistribution::Poisson { rate: -1.0 }
                .sampler()
                .is_err()
        );
        assert!(
            CountDistribution::Poisson { rate: f64::NAN }
                .sampler()
                .is_err()
        );
        assert!(
            CountDistribution::NegativeBinomial {
                shape: 0.0,
                prob: 0.5
            }
            .sampler()
            .is_err()
        );
        assert!(
            CountDistribution::NegativeBinomial {
                shape: 1.0,
                prob: 0.0
            }
            .sampler()
            .is_err()
        );
        assert!(
            CountDistribution::NegativeBinomial {
                shape: 1.0,
                prob: 1.5
            }
            .sampler()
            .is_err()
        );
    }

    #[test]
    fn poisson_sample_mean() {
        let s = CountDistribution::Poisson { rate: 4.0 }.sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| s.sample(&mut rng)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 4.0).abs() < 0.1, "mean {mean}");
    }
}

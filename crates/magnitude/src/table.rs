//! Gutenberg-Richter bin table and sampling.

use rand::Rng;

use crate::error::MagnitudeError;

/// Exclusive upper bound of the magnitude range.
pub const MAG_CEILING: f64 = 8.1;

/// Width of one magnitude bin.
pub const BIN_WIDTH: f64 = 0.1;

/// Discretised, truncated Gutenberg-Richter (`b = 1`) magnitude distribution.
///
/// Build once per forecast and share across every simulation; sampling
/// only reads the table.
#[derive(Debug, Clone)]
pub struct MagnitudeTable {
    /// Lower edge of each bin.
    lower_edges: Vec<f64>,
    /// Normalised probability mass of each bin.
    probs: Vec<f64>,
    /// Cumulative mass; last entry forced to 1.0.
    cdf: Vec<f64>,
    ceiling: f64,
    width: f64,
}

impl MagnitudeTable {
    /// Builds the table for `[mag_min, MAG_CEILING)` with [`BIN_WIDTH`] bins.
    ///
    /// # Errors
    ///
    /// See [`MagnitudeTable::with_range`].
    pub fn new(mag_min: f64) -> Result<Self, MagnitudeError> {
        Self::with_range(mag_min, MAG_CEILING, BIN_WIDTH)
    }

    /// Builds the table for an explicit range and bin width.
    ///
    /// Edges are `mag_min + i * width` for every `i` whose edge lies below
    /// `ceiling`; bins sit between consecutive edges.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`MagnitudeError::NonFinite`] | `mag_min`, `ceiling` or `width` is NaN/inf |
    /// | [`MagnitudeError::InvalidBinWidth`] | `width <= 0` |
    /// | [`MagnitudeError::EmptyRange`] | fewer than two edges below `ceiling` |
    pub fn with_range(mag_min: f64, ceiling: f64, width: f64) -> Result<Self, MagnitudeError> {
        for (name, value) in [("mag_min", mag_min), ("ceiling", ceiling), ("width", width)] {
            if !value.is_finite() {
                return Err(MagnitudeError::NonFinite { name, value });
            }
        }
        if width <= 0.0 {
            return Err(MagnitudeError::InvalidBinWidth { width });
        }

        let edges: Vec<f64> = (0..)
            .map(|i| mag_min + i as f64 * width)
            .take_while(|&edge| edge < ceiling)
            .collect();
        if edges.len() < 2 {
            return Err(MagnitudeError::EmptyRange {
                mag_min,
                ceiling,
                width,
            });
        }

        let mut probs: Vec<f64> = edges
            .windows(2)
            .map(|w| 10f64.powf(-w[0]) - 10f64.powf(-w[1]))
            .collect();
        let total: f64 = probs.iter().sum();
        for p in &mut probs {
            *p /= total;
        }

        let mut acc = 0.0;
        let mut cdf: Vec<f64> = probs
            .iter()
            .map(|p| {
                acc += p;
                acc
            })
            .collect();
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        let mut lower_edges = edges;
        lower_edges.pop();

        Ok(Self {
            lower_edges,
            probs,
            cdf,
            ceiling,
            width,
        })
    }

    /// Draws one magnitude: the lower edge of a GR-weighted bin.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        let u: f64 = rng.random();
        let idx = self
            .cdf
            .partition_point(|&c| c < u)
            .min(self.lower_edges.len() - 1);
        self.lower_edges[idx]
    }

    /// Lower edge of every bin, ascending.
    pub fn lower_edges(&self) -> &[f64] {
        &self.lower_edges
    }

    /// Normalised probability of every bin.
    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    /// Smallest magnitude the table can produce.
    pub fn mag_min(&self) -> f64 {
        self.lower_edges[0]
    }

    /// Exclusive upper bound of the range.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Bin width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.lower_edges.len()
    }

    /// Always `false`: construction guarantees at least one bin.
    pub fn is_empty(&self) -> bool {
        self.lower_edges.is_empty()
    }
}

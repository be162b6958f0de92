//! Moment-matched normal curves for drawing over band histograms.

use crate::analysis::statistics::{SampleStdDev, SampleSummary};
use statrs::distribution::{Continuous, Normal};

/// Width, in standard deviations either side of the mean, spanned by [`NormalFit::curve`].
const CURVE_HALF_WIDTH: f64 = 4.0;

/// A normal distribution with the sample mean and standard deviation of a group.
///
/// Only meant for visualisation, there is no goodness-of-fit assessment.
#[derive(Debug, Clone)]
pub struct NormalFit {
    mean: f64,
    stdev: f64,
    distribution: Normal,
}

impl NormalFit {
    /// `None` when the summary has insufficient data or zero spread.
    pub fn from_summary(summary: &SampleSummary) -> Option<Self> {
        match summary.stdev {
            SampleStdDev::Value(stdev) => Self::new(summary.mean, stdev),
            SampleStdDev::InsufficientData => None,
        }
    }

    pub fn fit(values: &[f64]) -> Option<Self> {
        Self::from_summary(&SampleSummary::from_values(values))
    }

    fn new(mean: f64, stdev: f64) -> Option<Self> {
        let distribution = Normal::new(mean, stdev).ok()?;
        Some(Self {
            mean,
            stdev,
            distribution,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.distribution.pdf(x)
    }

    /// `points` evenly spaced `(x, pdf(x))` pairs covering mean ± 4 standard deviations.
    pub fn curve(&self, points: usize) -> Vec<(f64, f64)> {
        let start = self.mean - CURVE_HALF_WIDTH * self.stdev;
        match points {
            0 => Vec::new(),
            1 => vec![(self.mean, self.pdf(self.mean))],
            _ => {
                let step = 2.0 * CURVE_HALF_WIDTH * self.stdev / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = start + step * i as f64;
                        (x, self.pdf(x))
                    })
                    .collect()
            }
        }
    }

    /// Curve scaled to a count histogram of `count` samples with bins of `bin_width`.
    pub fn histogram_curve(&self, points: usize, count: usize, bin_width: f64) -> Vec<(f64, f64)> {
        let scale = count as f64 * bin_width;
        self.curve(points)
            .into_iter()
            .map(|(x, y)| (x, y * scale))
            .collect()
    }
}

//! Count, mean and sample standard deviation, per band.

use crate::analysis::bucketizer::Classification;
use std::fmt;

/// Sample (n - 1) standard deviation, or a marker that fewer than two samples exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleStdDev {
    Value(f64),
    InsufficientData,
}

impl SampleStdDev {
    pub fn value(&self) -> Option<f64> {
        match self {
            SampleStdDev::Value(v) => Some(*v),
            SampleStdDev::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, SampleStdDev::InsufficientData)
    }
}

impl fmt::Display for SampleStdDev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleStdDev::Value(v) => write!(f, "{:.2}", v),
            SampleStdDev::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

/// Descriptive statistics of a group of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    /// Arithmetic mean, 0 for an empty group.
    pub mean: f64,
    pub stdev: SampleStdDev,
}

impl SampleSummary {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: 0.0,
                stdev: SampleStdDev::InsufficientData,
            };
        }

        let mean = values.iter().sum::<f64>() / count as f64;
        let stdev = if count < 2 {
            SampleStdDev::InsufficientData
        } else {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            SampleStdDev::Value((squares / (count - 1) as f64).sqrt())
        };
        Self { count, mean, stdev }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    pub label: String,
    pub summary: SampleSummary,
}

/// One [`SampleSummary`] per band, in band-set order. Bands without samples are included.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStatistics {
    bands: Vec<BandSummary>,
}

impl BandStatistics {
    pub fn compute(classification: &Classification) -> Self {
        let bands = classification
            .bands()
            .bands()
            .iter()
            .enumerate()
            .map(|(index, band)| {
                let values: Vec<f64> = classification.values_in(index).collect();
                BandSummary {
                    label: band.label().to_string(),
                    summary: SampleSummary::from_values(&values),
                }
            })
            .collect();
        Self { bands }
    }

    pub fn bands(&self) -> &[BandSummary] {
        &self.bands
    }

    pub fn get(&self, label: &str) -> Option<&SampleSummary> {
        self.bands
            .iter()
            .find(|b| b.label == label)
            .map(|b| &b.summary)
    }

    pub fn total_count(&self) -> usize {
        self.bands.iter().map(|b| b.summary.count).sum()
    }
}

//! Runs of consecutive samples sharing a band, and run-length statistics per band.

use crate::analysis::band::BandSet;
use crate::analysis::bucketizer::Classification;
use crate::analysis::error::AnalysisError;
use crate::analysis::statistics::{BandSummary, SampleSummary};

/// A maximal stretch of consecutive assignments in the same band.
///
/// `start_index` and `end_index` are inclusive positions in the classified sequence.
/// `band` indexes the band set; [`RunLengthAnalysis::label`] gives its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub band: usize,
    pub length: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// The runs of a classification plus mean and sample stdev of run length per band.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLengthAnalysis {
    bands: BandSet,
    runs: Vec<Run>,
    statistics: Vec<BandSummary>,
}

impl RunLengthAnalysis {
    /// Splits the classification into runs and summarises run lengths per band.
    ///
    /// Statistics are reported for every band in band-set order; a band with fewer than two
    /// runs has [`crate::SampleStdDev::InsufficientData`] as its stdev.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyInput`] if the classification has no assignments.
    pub fn compute(classification: &Classification) -> Result<Self, AnalysisError> {
        let bands: Vec<usize> = classification.assignments().iter().map(|a| a.band).collect();
        let runs = split_runs(&bands)?;

        let statistics = classification
            .bands()
            .bands()
            .iter()
            .enumerate()
            .map(|(index, band)| {
                let lengths: Vec<f64> = runs
                    .iter()
                    .filter(|run| run.band == index)
                    .map(|run| run.length as f64)
                    .collect();
                BandSummary {
                    label: band.label().to_string(),
                    summary: SampleSummary::from_values(&lengths),
                }
            })
            .collect();

        Ok(Self {
            bands: classification.bands().clone(),
            runs,
            statistics,
        })
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn label(&self, run: &Run) -> &str {
        self.bands.bands()[run.band].label()
    }

    /// Run-length summaries, in band-set order.
    pub fn statistics(&self) -> &[BandSummary] {
        &self.statistics
    }

    pub fn get(&self, label: &str) -> Option<&SampleSummary> {
        self.statistics
            .iter()
            .find(|b| b.label == label)
            .map(|b| &b.summary)
    }

    /// Length of the sequence the runs were built from.
    pub fn sequence_len(&self) -> usize {
        self.runs.iter().map(|run| run.length).sum()
    }

    /// The label sequence the runs were built from.
    pub fn expand(&self) -> Vec<&str> {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat(self.label(run)).take(run.length))
            .collect()
    }
}

fn split_runs(bands: &[usize]) -> Result<Vec<Run>, AnalysisError> {
    let (&first, rest) = bands
        .split_first()
        .ok_or(AnalysisError::EmptyInput("band assignments"))?;

    let mut runs = Vec::new();
    let mut current = Run {
        band: first,
        length: 1,
        start_index: 0,
        end_index: 0,
    };
    for (offset, &band) in rest.iter().enumerate() {
        let index = offset + 1;
        if band == current.band {
            current.length += 1;
            current.end_index = index;
        } else {
            runs.push(current);
            current = Run {
                band,
                length: 1,
                start_index: index,
                end_index: index,
            };
        }
    }
    runs.push(current);
    Ok(runs)
}

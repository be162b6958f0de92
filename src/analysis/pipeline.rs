//! End-to-end analysis of a variable pair: differences, bands, band statistics and runs.

use crate::analysis::band::BandSet;
use crate::analysis::bucketizer::{Bucketizer, Classification};
use crate::analysis::difference::{DailySums, DifferenceSeries};
use crate::analysis::error::AnalysisError;
use crate::analysis::normal::NormalFit;
use crate::analysis::run_length::RunLengthAnalysis;
use crate::analysis::statistics::BandStatistics;
use crate::types::time_series::TimeSeriesTable;
use crate::types::variable::AIR_TEMPERATURE_2M;
use bon::builder;
use log::{debug, warn};

/// Everything derived from one `(variable_a, variable_b)` pair of a table.
///
/// All parts are recomputed from the table on every call; nothing refers back to it.
#[derive(Debug, Clone)]
pub struct PairAnalysis {
    pub differences: DifferenceSeries,
    pub classification: Classification,
    pub band_statistics: BandStatistics,
    pub run_lengths: RunLengthAnalysis,
}

impl PairAnalysis {
    /// Runs the whole chain on a table that is known to be present.
    pub fn compute(
        table: &TimeSeriesTable,
        variable_a: &str,
        variable_b: &str,
        bands: BandSet,
    ) -> Result<Self, AnalysisError> {
        let differences = DifferenceSeries::compute(table, variable_a, variable_b)?;
        let classification = Bucketizer::new(bands).bucketize(differences.values())?;
        let band_statistics = BandStatistics::compute(&classification);
        let run_lengths = RunLengthAnalysis::compute(&classification)?;

        debug!(
            "Analysed {} - {}: {} samples, {} runs over {} bands",
            variable_b,
            variable_a,
            differences.len(),
            run_lengths.runs().len(),
            classification.bands().len()
        );

        Ok(Self {
            differences,
            classification,
            band_statistics,
            run_lengths,
        })
    }

    /// Normal fit of the difference values in each band, in band-set order.
    pub fn normal_fits(&self) -> Vec<(&str, Option<NormalFit>)> {
        self.band_statistics
            .bands()
            .iter()
            .map(|band| (band.label.as_str(), NormalFit::from_summary(&band.summary)))
            .collect()
    }

    pub fn daily_sums(&self) -> DailySums {
        self.differences.daily_sums()
    }
}

/// Analyses `variable_b - variable_a` of `table`.
///
/// An absent table (the fetch failed) is not an error: it is logged and `Ok(None)` is
/// returned. A table that is present but lacks a variable, or has no records, is.
///
/// # Examples
///
/// ```no_run
/// # use soiltemp::{analyze_pair, BandSet, TimeSeriesTable, AnalysisError};
/// # fn run(table: &TimeSeriesTable) -> Result<(), AnalysisError> {
/// let analysis = analyze_pair()
///     .table(table)
///     .variable_a("temperature_2m")
///     .variable_b("soil_temperature_6cm")
///     .bands(BandSet::three_band())
///     .call()?;
///
/// if let Some(analysis) = analysis {
///     for band in analysis.band_statistics.bands() {
///         println!("{}: {} samples", band.label, band.summary.count);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[builder]
pub fn analyze_pair(
    table: Option<&TimeSeriesTable>,
    variable_a: &str,
    variable_b: &str,
    bands: BandSet,
) -> Result<Option<PairAnalysis>, AnalysisError> {
    let Some(table) = table else {
        warn!(
            "No data to analyze for {} - {}",
            variable_b, variable_a
        );
        return Ok(None);
    };
    PairAnalysis::compute(table, variable_a, variable_b, bands).map(Some)
}

/// Analyses every variable of `table` against `reference` (air temperature at 2 m by
/// default), in table column order.
///
/// Returns `Ok(None)` when the table is absent, like [`analyze_pair`].
#[builder]
pub fn analyze_against_reference(
    table: Option<&TimeSeriesTable>,
    #[builder(default = AIR_TEMPERATURE_2M)] reference: &str,
    bands: BandSet,
) -> Result<Option<Vec<PairAnalysis>>, AnalysisError> {
    let Some(table) = table else {
        warn!("No data to analyze against {}", reference);
        return Ok(None);
    };
    table
        .variables()
        .iter()
        .filter(|variable| variable.as_str() != reference)
        .map(|variable| PairAnalysis::compute(table, reference, variable, bands.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

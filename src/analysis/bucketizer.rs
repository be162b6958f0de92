//! Classification of difference values into the bands of a [`BandSet`].

use crate::analysis::band::BandSet;
use crate::analysis::difference::DifferenceValue;
use crate::analysis::error::AnalysisError;
use chrono::{DateTime, NaiveDateTime, Utc};
use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};

/// The band a single difference value was classified into.
///
/// `band` indexes into the [`BandSet`] of the owning [`Classification`], whose
/// [`Classification::label`] resolves it to the band label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandAssignment {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub band: usize,
}

/// Assigns each value to the first band, in band-set order, that contains it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucketizer {
    bands: BandSet,
}

impl Bucketizer {
    /// The band set has already been validated by [`BandSet::new`] or is a preset.
    pub fn new(bands: BandSet) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &BandSet {
        &self.bands
    }

    /// Classifies every value in one pass, producing one assignment per input value.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unclassifiable`] for a value no band contains (NaN).
    pub fn bucketize(&self, values: &[DifferenceValue]) -> Result<Classification, AnalysisError> {
        let assignments = values
            .iter()
            .enumerate()
            .map(|(index, diff)| {
                let band = self
                    .bands
                    .classify(diff.value)
                    .ok_or(AnalysisError::Unclassifiable {
                        index,
                        value: diff.value,
                    })?;
                Ok(BandAssignment {
                    timestamp: diff.timestamp,
                    value: diff.value,
                    band,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Classification {
            bands: self.bands.clone(),
            assignments,
        })
    }
}

/// A sequence of [`BandAssignment`]s together with the band set they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    bands: BandSet,
    assignments: Vec<BandAssignment>,
}

impl Classification {
    pub fn bands(&self) -> &BandSet {
        &self.bands
    }

    pub fn assignments(&self) -> &[BandAssignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn label(&self, assignment: &BandAssignment) -> &str {
        self.bands.bands()[assignment.band].label()
    }

    /// Band label of every assignment, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.assignments.iter().map(|a| self.label(a))
    }

    /// Number of assignments per band, in band-set order.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.bands.len()];
        for assignment in &self.assignments {
            counts[assignment.band] += 1;
        }
        counts
    }

    /// Values falling in band `band`, in time order.
    pub fn values_in(&self, band: usize) -> impl Iterator<Item = f64> + '_ {
        self.assignments
            .iter()
            .filter(move |a| a.band == band)
            .map(|a| a.value)
    }

    /// `time`, `difference` and `band` columns.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let times: Vec<NaiveDateTime> = self
            .assignments
            .iter()
            .map(|a| a.timestamp.naive_utc())
            .collect();
        let values: Vec<f64> = self.assignments.iter().map(|a| a.value).collect();
        let labels: Vec<&str> = self.labels().collect();
        DataFrame::new(vec![
            Series::new("time".into(), times).into(),
            Series::new("difference".into(), values).into(),
            Series::new("band".into(), labels).into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::band::{HIGH, LOW, MID, MID_HIGH, MID_LOW};
    use chrono::{Duration, TimeZone};

    fn diffs(values: &[f64]) -> Vec<DifferenceValue> {
        let start = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| DifferenceValue {
                timestamp: start + Duration::hours(i as i64),
                value,
            })
            .collect()
    }

    #[test]
    fn test_three_band_scenario() -> Result<(), AnalysisError> {
        let classification =
            Bucketizer::new(BandSet::three_band()).bucketize(&diffs(&[1.6, 0.0, -1.6, 1.4]))?;

        assert_eq!(
            classification.labels().collect::<Vec<_>>(),
            vec![HIGH, MID, LOW, MID]
        );
        assert_eq!(classification.counts(), vec![1, 2, 1]);
        assert_eq!(
            classification.values_in(1).collect::<Vec<_>>(),
            vec![0.0, 1.4]
        );
        Ok(())
    }

    #[test]
    fn test_four_band_labels() -> Result<(), AnalysisError> {
        let classification = Bucketizer::new(BandSet::four_band())
            .bucketize(&diffs(&[1.5, 1.49, 0.0, -0.01, -1.49, -1.5]))?;
        assert_eq!(
            classification.labels().collect::<Vec<_>>(),
            vec![HIGH, MID_HIGH, MID_HIGH, MID_LOW, MID_LOW, LOW]
        );
        Ok(())
    }

    #[test]
    fn test_counts_cover_every_value() -> Result<(), AnalysisError> {
        let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 10.0 - 5.0).collect();
        for bands in [BandSet::two_band(), BandSet::three_band(), BandSet::four_band()] {
            let classification = Bucketizer::new(bands).bucketize(&diffs(&values))?;
            assert_eq!(classification.len(), values.len());
            assert_eq!(classification.counts().iter().sum::<usize>(), values.len());
        }
        Ok(())
    }

    #[test]
    fn test_timestamps_and_values_are_kept() -> Result<(), AnalysisError> {
        let input = diffs(&[0.3, -2.0]);
        let classification = Bucketizer::new(BandSet::two_band()).bucketize(&input)?;
        for (assignment, diff) in classification.assignments().iter().zip(&input) {
            assert_eq!(assignment.timestamp, diff.timestamp);
            assert_eq!(assignment.value, diff.value);
        }
        Ok(())
    }

    #[test]
    fn test_nan_is_rejected() {
        let result = Bucketizer::new(BandSet::two_band()).bucketize(&diffs(&[1.0, f64::NAN]));
        assert!(matches!(
            result,
            Err(AnalysisError::Unclassifiable { index: 1, .. })
        ));
    }

    #[test]
    fn test_to_dataframe() -> Result<(), Box<dyn std::error::Error>> {
        let classification =
            Bucketizer::new(BandSet::three_band()).bucketize(&diffs(&[1.6, 0.0]))?;
        let df = classification.to_dataframe()?;
        assert_eq!(df.shape(), (2, 3));
        let bands = df.column("band")?.str()?;
        assert_eq!(bands.get(0), Some(HIGH));
        assert_eq!(bands.get(1), Some(MID));
        Ok(())
    }
}

//! The hourly table handed over by the archive client and read by the analysis engine.

use crate::analysis::error::AnalysisError;
use chrono::{DateTime, NaiveDateTime, Utc};
use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use std::collections::HashMap;

/// One hourly observation: a timestamp and the value of every variable at that hour.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRecord {
    pub timestamp: DateTime<Utc>,
    pub values: HashMap<String, f64>,
}

impl TimeSeriesRecord {
    pub fn new(timestamp: DateTime<Utc>, values: HashMap<String, f64>) -> Self {
        Self { timestamp, values }
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

/// An ordered, read-only sequence of [`TimeSeriesRecord`]s.
///
/// Records are guaranteed to be in non-decreasing timestamp order. `variables` keeps the
/// order in which the variables were requested, which is the column order of
/// [`TimeSeriesTable::to_dataframe`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    variables: Vec<String>,
    records: Vec<TimeSeriesRecord>,
}

impl TimeSeriesTable {
    /// Builds a table, checking that the timestamps never go backwards.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnorderedRecords`] with the index of the first record whose
    /// timestamp is earlier than its predecessor.
    pub fn new(
        variables: Vec<String>,
        records: Vec<TimeSeriesRecord>,
    ) -> Result<Self, AnalysisError> {
        if let Some(index) = records
            .windows(2)
            .position(|pair| pair[1].timestamp < pair[0].timestamp)
        {
            return Err(AnalysisError::UnorderedRecords { index: index + 1 });
        }
        Ok(Self { variables, records })
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn records(&self) -> &[TimeSeriesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.records.iter().map(|r| r.timestamp)
    }

    /// Converts the table into a polars `DataFrame` with a `time` column followed by one
    /// nullable `f64` column per variable.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let times: Vec<NaiveDateTime> = self.timestamps().map(|t| t.naive_utc()).collect();
        let mut columns: Vec<Column> = Vec::with_capacity(self.variables.len() + 1);
        columns.push(Series::new("time".into(), times).into());
        for variable in &self.variables {
            let values: Vec<Option<f64>> =
                self.records.iter().map(|r| r.get(variable)).collect();
            columns.push(Series::new(variable.as_str().into(), values).into());
        }
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(hour: u32, air: f64) -> TimeSeriesRecord {
        TimeSeriesRecord::new(
            Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            HashMap::from([("temperature_2m".to_string(), air)]),
        )
    }

    #[test]
    fn test_rejects_unordered_records() {
        let result = TimeSeriesTable::new(
            vec!["temperature_2m".to_string()],
            vec![record(0, 1.0), record(2, 2.0), record(1, 3.0)],
        );
        assert_eq!(result, Err(AnalysisError::UnorderedRecords { index: 2 }));
    }

    #[test]
    fn test_accepts_repeated_timestamps() {
        let table = TimeSeriesTable::new(
            vec!["temperature_2m".to_string()],
            vec![record(0, 1.0), record(0, 2.0), record(1, 3.0)],
        )
        .unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_to_dataframe() -> Result<(), Box<dyn std::error::Error>> {
        let mut sparse = record(1, 4.5);
        sparse.values.clear();
        let table = TimeSeriesTable::new(
            vec!["temperature_2m".to_string()],
            vec![record(0, 3.0), sparse],
        )?;

        let df = table.to_dataframe()?;
        assert_eq!(df.shape(), (2, 2));

        let air = df.column("temperature_2m")?.f64()?;
        assert_eq!(air.get(0), Some(3.0));
        assert_eq!(air.get(1), None);
        assert!(df.column("time").is_ok());
        Ok(())
    }
}

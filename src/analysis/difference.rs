//! Elementwise differences between two variables of a [`TimeSeriesTable`].

use crate::analysis::error::AnalysisError;
use crate::types::time_series::TimeSeriesTable;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use std::collections::BTreeMap;

/// `value = variable_b - variable_a` at one timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceValue {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// The differences `variable_b - variable_a` for every record of a table, in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceSeries {
    variable_a: String,
    variable_b: String,
    values: Vec<DifferenceValue>,
}

impl DifferenceSeries {
    /// Computes `values[variable_b] - values[variable_a]` for each record.
    ///
    /// The result always has exactly one entry per record. Nothing is returned if either
    /// variable is missing from any record.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingVariable`] for the first record lacking either variable.
    pub fn compute(
        table: &TimeSeriesTable,
        variable_a: &str,
        variable_b: &str,
    ) -> Result<Self, AnalysisError> {
        let values = table
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let lookup = |variable: &str| {
                    record
                        .get(variable)
                        .ok_or_else(|| AnalysisError::MissingVariable {
                            variable: variable.to_string(),
                            index,
                        })
                };
                let a = lookup(variable_a)?;
                let b = lookup(variable_b)?;
                Ok(DifferenceValue {
                    timestamp: record.timestamp,
                    value: b - a,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Self {
            variable_a: variable_a.to_string(),
            variable_b: variable_b.to_string(),
            values,
        })
    }

    pub fn variable_a(&self) -> &str {
        &self.variable_a
    }

    pub fn variable_b(&self) -> &str {
        &self.variable_b
    }

    /// Column name used in exports, e.g. `soil_temperature_6cm_diff_to_temperature_2m`.
    pub fn name(&self) -> String {
        format!("{}_diff_to_{}", self.variable_b, self.variable_a)
    }

    pub fn values(&self) -> &[DifferenceValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sums the differences per UTC calendar day.
    pub fn daily_sums(&self) -> DailySums {
        let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for diff in &self.values {
            *days.entry(diff.timestamp.date_naive()).or_insert(0.0) += diff.value;
        }
        DailySums {
            days: days
                .into_iter()
                .map(|(date, total)| DailySum { date, total })
                .collect(),
        }
    }

    /// `time` and difference columns, named after [`DifferenceSeries::name`].
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let times: Vec<NaiveDateTime> = self.values.iter().map(|d| d.timestamp.naive_utc()).collect();
        let diffs: Vec<f64> = self.values.iter().map(|d| d.value).collect();
        DataFrame::new(vec![
            Series::new("time".into(), times).into(),
            Series::new(self.name().into(), diffs).into(),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySum {
    pub date: NaiveDate,
    pub total: f64,
}

/// Per-day sums of a difference series, ordered by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySums {
    pub days: Vec<DailySum>,
}

impl DailySums {
    /// Sum over all days.
    pub fn total(&self) -> f64 {
        self.days.iter().map(|d| d.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time_series::TimeSeriesRecord;
    use chrono::TimeZone;
    use std::collections::HashMap;

    const AIR: &str = "temperature_2m";
    const SOIL: &str = "soil_temperature_6cm";

    fn table(rows: &[(u32, u32, f64, f64)]) -> TimeSeriesTable {
        let records = rows
            .iter()
            .map(|&(day, hour, air, soil)| {
                TimeSeriesRecord::new(
                    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
                    HashMap::from([(AIR.to_string(), air), (SOIL.to_string(), soil)]),
                )
            })
            .collect();
        TimeSeriesTable::new(vec![AIR.to_string(), SOIL.to_string()], records).unwrap()
    }

    #[test]
    fn test_compute_differences() -> Result<(), AnalysisError> {
        let table = table(&[(1, 0, 10.0, 12.0), (1, 1, 11.0, 10.5), (1, 2, 9.0, 9.0)]);

        let series = DifferenceSeries::compute(&table, AIR, SOIL)?;

        assert_eq!(series.len(), table.len());
        let values: Vec<f64> = series.values().iter().map(|d| d.value).collect();
        assert_eq!(values, vec![2.0, -0.5, 0.0]);
        assert_eq!(series.values()[1].timestamp, table.records()[1].timestamp);
        assert_eq!(series.name(), "soil_temperature_6cm_diff_to_temperature_2m");
        Ok(())
    }

    #[test]
    fn test_missing_variable() {
        let mut table_records = table(&[(1, 0, 10.0, 12.0), (1, 1, 11.0, 10.5)])
            .records()
            .to_vec();
        table_records[1].values.remove(SOIL);
        let table =
            TimeSeriesTable::new(vec![AIR.to_string(), SOIL.to_string()], table_records).unwrap();

        let result = DifferenceSeries::compute(&table, AIR, SOIL);
        assert_eq!(
            result,
            Err(AnalysisError::MissingVariable {
                variable: SOIL.to_string(),
                index: 1,
            })
        );

        let unknown = DifferenceSeries::compute(&table, AIR, "soil_temperature_100cm");
        assert!(matches!(
            unknown,
            Err(AnalysisError::MissingVariable { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_table_gives_empty_series() -> Result<(), AnalysisError> {
        let table = table(&[]);
        let series = DifferenceSeries::compute(&table, AIR, SOIL)?;
        assert!(series.is_empty());
        Ok(())
    }

    #[test]
    fn test_daily_sums() -> Result<(), AnalysisError> {
        let table = table(&[
            (1, 22, 10.0, 12.0),
            (1, 23, 10.0, 11.0),
            (2, 0, 10.0, 9.5),
            (3, 5, 10.0, 10.25),
        ]);
        let sums = DifferenceSeries::compute(&table, AIR, SOIL)?.daily_sums();

        let expected = vec![
            DailySum {
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                total: 3.0,
            },
            DailySum {
                date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                total: -0.5,
            },
            DailySum {
                date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
                total: 0.25,
            },
        ];
        assert_eq!(sums.days, expected);
        assert_eq!(sums.total(), 2.75);
        Ok(())
    }

    #[test]
    fn test_to_dataframe() -> Result<(), Box<dyn std::error::Error>> {
        let table = table(&[(1, 0, 10.0, 12.0), (1, 1, 11.0, 10.5)]);
        let df = DifferenceSeries::compute(&table, AIR, SOIL)?.to_dataframe()?;
        assert_eq!(df.shape(), (2, 2));
        let diffs = df
            .column("soil_temperature_6cm_diff_to_temperature_2m")?
            .f64()?;
        assert_eq!(diffs.get(0), Some(2.0));
        Ok(())
    }
}

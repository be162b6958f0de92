//! Conversion of archive JSON bodies into [`TimeSeriesTable`]s.

use crate::archive::error::FetchError;
use crate::types::time_series::{TimeSeriesRecord, TimeSeriesTable};
use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Deserialize)]
struct ArchiveBody {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Option<Vec<String>>,
    #[serde(flatten)]
    series: HashMap<String, Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub reason: String,
}

/// Builds a table from the entries of `hourly.time` for which every requested variable has a
/// value. Hours with a null in any requested variable are dropped with a warning.
///
/// # Errors
///
/// Besides malformed bodies, returns [`FetchError::NoCompleteRecords`] when no hour is left.
pub(crate) fn parse_archive_response(
    body: &str,
    variables: &[String],
) -> Result<TimeSeriesTable, FetchError> {
    let body: ArchiveBody = serde_json::from_str(body)?;
    let mut hourly = body
        .hourly
        .ok_or_else(|| FetchError::MissingField("hourly".to_string()))?;
    let times = hourly
        .time
        .take()
        .ok_or_else(|| FetchError::MissingField("hourly.time".to_string()))?;

    let mut columns = Vec::with_capacity(variables.len());
    for variable in variables {
        let values = hourly
            .series
            .remove(variable)
            .ok_or_else(|| FetchError::MissingField(format!("hourly.{}", variable)))?;
        if values.len() != times.len() {
            return Err(FetchError::LengthMismatch {
                variable: variable.clone(),
                expected: times.len(),
                found: values.len(),
            });
        }
        columns.push((variable, values));
    }

    let rows = times
        .iter()
        .enumerate()
        .map(|(row, value)| {
            let timestamp = NaiveDateTime::parse_from_str(value, TIME_FORMAT)
                .map_err(|source| FetchError::TimestampParse {
                    value: value.clone(),
                    source,
                })?
                .and_utc();
            let values = columns
                .iter()
                .map(|(variable, values)| values[row].map(|v| (variable.to_string(), v)))
                .collect::<Option<HashMap<_, _>>>();
            Ok(values.map(|values| TimeSeriesRecord::new(timestamp, values)))
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    let records: Vec<TimeSeriesRecord> = rows.into_iter().flatten().collect();
    let dropped = times.len() - records.len();
    if dropped > 0 {
        warn!(
            "Dropped {} of {} hours with missing values for {}",
            dropped,
            times.len(),
            variables.join(", ")
        );
    }
    if records.is_empty() {
        return Err(FetchError::NoCompleteRecords);
    }

    TimeSeriesTable::new(variables.to_vec(), records).map_err(FetchError::InvalidTable)
}

//! Parameters of an hourly archive query.

use crate::archive::error::FetchError;
use crate::types::lat_lon::LatLon;
use crate::types::variable::DEFAULT_VARIABLES;
use bon::Builder;
use chrono::NaiveDate;

/// Timestamps are requested in UTC so they convert directly to `DateTime<Utc>`.
const TIMEZONE: &str = "GMT";

/// An hourly archive query for one location and an inclusive date range.
///
/// # Examples
///
/// ```
/// use soiltemp::{ArchiveRequest, LatLon};
/// use chrono::NaiveDate;
///
/// let request = ArchiveRequest::builder()
///     .location(LatLon(52.1015, 5.1779))
///     .start_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2024, 4, 7).unwrap())
///     .build();
///
/// // Air temperature plus four soil depths unless `.variables(..)` is given.
/// assert_eq!(request.variables().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ArchiveRequest {
    location: LatLon,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[builder(default = DEFAULT_VARIABLES.iter().map(|v| v.to_string()).collect())]
    variables: Vec<String>,
}

impl ArchiveRequest {
    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Checks the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] for an out-of-range coordinate, a start date
    /// after the end date, or an empty or blank variable list.
    pub fn validate(&self) -> Result<(), FetchError> {
        let LatLon(lat, lon) = self.location;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(FetchError::InvalidRequest(format!(
                "coordinate ({}, {}) is out of range",
                lat, lon
            )));
        }
        if self.start_date > self.end_date {
            return Err(FetchError::InvalidRequest(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if self.variables.is_empty() || self.variables.iter().any(|v| v.trim().is_empty()) {
            return Err(FetchError::InvalidRequest(
                "at least one non-empty variable name is required".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.location.latitude().to_string()),
            ("longitude", self.location.longitude().to_string()),
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            ("hourly", self.variables.join(",")),
            ("timezone", TIMEZONE.to_string()),
        ]
    }
}

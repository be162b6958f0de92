use crate::archive::error::FetchError;
use crate::types::time_series::TimeSeriesTable;
use log::error;

/// Collapses every kind of fetch failure into "no data to analyze".
pub trait FetchResultExt {
    /// The table, or `None` after logging why it could not be fetched.
    fn into_available(self) -> Option<TimeSeriesTable>;
}

impl FetchResultExt for Result<TimeSeriesTable, FetchError> {
    fn into_available(self) -> Option<TimeSeriesTable> {
        match self {
            Ok(table) => Some(table),
            Err(e) => {
                error!("Error fetching data: {}", e);
                None
            }
        }
    }
}

//! The HTTP client for the Open-Meteo historical weather archive.

use crate::analysis::band::BandSet;
use crate::analysis::pipeline::{analyze_against_reference, PairAnalysis};
use crate::archive::available::FetchResultExt;
use crate::archive::error::FetchError;
use crate::archive::request::ArchiveRequest;
use crate::archive::response::{parse_archive_response, ApiErrorBody};
use crate::error::SoilTempError;
use crate::types::time_series::TimeSeriesTable;
use crate::types::variable::AIR_TEMPERATURE_2M;
use log::{info, warn};
use reqwest::Client;

pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Fetches hourly series from the archive API.
///
/// # Examples
///
/// ```no_run
/// # use soiltemp::{ArchiveRequest, BandSet, LatLon, OpenMeteo, SoilTempError};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), SoilTempError> {
/// let client = OpenMeteo::new();
/// let request = ArchiveRequest::builder()
///     .location(LatLon(52.1015, 5.1779))
///     .start_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2024, 4, 7).unwrap())
///     .build();
///
/// let table = client.fetch(&request).await?;
/// println!("{} hourly records", table.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    client: Client,
    base_url: String,
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteo {
    pub fn new() -> Self {
        Self::with_base_url(ARCHIVE_URL)
    }

    /// Client for an archive-compatible endpoint at `base_url`, e.g. a self-hosted instance.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, request: &ArchiveRequest) -> Result<reqwest::Request, FetchError> {
        self.client
            .get(&self.base_url)
            .query(&request.query_pairs())
            .build()
            .map_err(|e| FetchError::NetworkRequest(self.base_url.clone(), e))
    }

    /// Downloads the requested hourly variables as a [`TimeSeriesTable`].
    ///
    /// # Errors
    ///
    /// * [`FetchError::InvalidRequest`] if the request does not validate.
    /// * [`FetchError::NetworkRequest`], [`FetchError::HttpStatus`] or [`FetchError::Api`]
    ///   when the server cannot be reached or refuses the request.
    /// * [`FetchError::JsonParse`], [`FetchError::MissingField`] and friends when the
    ///   response body does not contain the requested series.
    pub async fn fetch(&self, request: &ArchiveRequest) -> Result<TimeSeriesTable, FetchError> {
        request.validate()?;
        self.fetch_validated(request).await
    }

    // Callers have already run `ArchiveRequest::validate`.
    async fn fetch_validated(&self, request: &ArchiveRequest) -> Result<TimeSeriesTable, FetchError> {
        let http_request = self.build_request(request)?;
        let url = http_request.url().to_string();
        info!(
            "Fetching {} hourly variables from {} to {} at ({}, {})",
            request.variables().len(),
            request.start_date(),
            request.end_date(),
            request.location().latitude(),
            request.location().longitude()
        );

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;
        let status = response.status();
        let status_error = response.error_for_status_ref().err();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        if let Some(source) = status_error {
            warn!("HTTP error for {}: {:?}", url, source);
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api) => FetchError::Api {
                    status,
                    reason: api.reason,
                },
                Err(_) => FetchError::HttpStatus {
                    url,
                    status,
                    source,
                },
            });
        }

        let table = parse_archive_response(&body, request.variables())?;
        info!("Received {} hourly records", table.len());
        Ok(table)
    }

    /// Fetches the request and compares every variable against air temperature at 2 m.
    ///
    /// Any failure to obtain data is logged and reported as `Ok(None)`, the same as an
    /// absent table. An invalid request or an analysis error is returned as an error.
    pub async fn analyze(
        &self,
        request: &ArchiveRequest,
        bands: BandSet,
    ) -> Result<Option<Vec<PairAnalysis>>, SoilTempError> {
        request.validate()?;
        let fetched = self.fetch_validated(request).await;
        analyze_fetched(fetched, bands)
    }
}

fn analyze_fetched(
    fetched: Result<TimeSeriesTable, FetchError>,
    bands: BandSet,
) -> Result<Option<Vec<PairAnalysis>>, SoilTempError> {
    let table = fetched.into_available();
    let analyses = analyze_against_reference()
        .maybe_table(table.as_ref())
        .reference(AIR_TEMPERATURE_2M)
        .bands(bands)
        .call()?;
    Ok(analyses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::lat_lon::LatLon;
    use chrono::NaiveDate;

    fn request() -> ArchiveRequest {
        ArchiveRequest::builder()
            .location(LatLon(52.1015, 5.1779))
            .start_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
            .variables(vec!["temperature_2m".into(), "soil_temperature_6cm".into()])
            .build()
    }

    #[test]
    fn test_request_url() -> Result<(), FetchError> {
        let http_request = OpenMeteo::new().build_request(&request())?;
        let url = http_request.url();

        assert_eq!(url.host_str(), Some("archive-api.open-meteo.com"));
        assert_eq!(url.path(), "/v1/archive");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("latitude".into(), "52.1015".into())));
        assert!(query.contains(&("start_date".into(), "2024-04-01".into())));
        assert!(query.contains(&(
            "hourly".into(),
            "temperature_2m,soil_temperature_6cm".into()
        )));
        Ok(())
    }

    #[test]
    fn test_null_hours_do_not_sink_other_depths() -> Result<(), SoilTempError> {
        let body = r#"{
            "hourly": {
                "time": ["2024-04-01T00:00", "2024-04-01T01:00", "2024-04-01T02:00"],
                "temperature_2m": [7.0, 6.0, 5.0],
                "soil_temperature_0cm": [8.0, 5.0, 5.5],
                "soil_temperature_54cm": [8.0, null, 9.0]
            }
        }"#;
        let variables: Vec<String> = ["temperature_2m", "soil_temperature_0cm", "soil_temperature_54cm"]
            .iter()
            .map(|v| v.to_string())
            .collect();

        let analyses = analyze_fetched(
            parse_archive_response(body, &variables),
            BandSet::two_band(),
        )?
        .expect("two complete hours remain");

        assert_eq!(analyses.len(), 2);
        for analysis in &analyses {
            assert_eq!(analysis.differences.len(), 2);
        }
        assert_eq!(analyses[0].differences.variable_b(), "soil_temperature_0cm");
        assert_eq!(analyses[1].differences.variable_b(), "soil_temperature_54cm");
        Ok(())
    }

    #[test]
    fn test_all_null_body_means_no_data() -> Result<(), SoilTempError> {
        let body = r#"{"hourly": {"time": ["2024-04-01T00:00"], "temperature_2m": [null], "soil_temperature_6cm": [4.0]}}"#;
        let variables = vec!["temperature_2m".to_string(), "soil_temperature_6cm".to_string()];
        let analyses = analyze_fetched(parse_archive_response(body, &variables), BandSet::two_band())?;
        assert!(analyses.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_request_is_an_error() {
        let reversed = ArchiveRequest::builder()
            .location(LatLon(52.1, 5.2))
            .start_date(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
            .end_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
            .build();
        let result = OpenMeteo::new().analyze(&reversed, BandSet::two_band()).await;
        assert!(matches!(
            result,
            Err(SoilTempError::Fetch(FetchError::InvalidRequest(_)))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_means_no_data() -> Result<(), SoilTempError> {
        let client = OpenMeteo::with_base_url("http://127.0.0.1:9/v1/archive");

        let fetched = client.fetch(&request()).await;
        assert!(matches!(fetched, Err(FetchError::NetworkRequest(_, _))));

        let analyses = client.analyze(&request(), BandSet::three_band()).await?;
        assert!(analyses.is_none());
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires network access to the Open-Meteo archive"]
    async fn test_fetch_de_bilt() -> Result<(), SoilTempError> {
        let table = OpenMeteo::new().fetch(&request()).await?;

        // Two full days of hourly data.
        assert_eq!(table.len(), 48);
        assert_eq!(table.variables().len(), 2);

        let analyses = OpenMeteo::new()
            .analyze(&request(), BandSet::four_band())
            .await?
            .expect("archive data should be available");
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].differences.len(), 48);
        Ok(())
    }
}

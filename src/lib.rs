//! Hourly air and soil temperatures from the Open-Meteo archive, and the statistics of their
//! differences: threshold bands, per-band mean and spread, and run lengths per band.

mod analysis;
mod archive;
mod error;
mod types;

pub use error::SoilTempError;

pub use analysis::band::*;
pub use analysis::bucketizer::*;
pub use analysis::difference::*;
pub use analysis::error::AnalysisError;
pub use analysis::normal::NormalFit;
pub use analysis::pipeline::*;
pub use analysis::run_length::*;
pub use analysis::statistics::*;

pub use archive::available::FetchResultExt;
pub use archive::client::*;
pub use archive::error::FetchError;
pub use archive::request::ArchiveRequest;

pub use types::lat_lon::LatLon;
pub use types::time_series::*;
pub use types::variable::*;

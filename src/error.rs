use crate::analysis::error::AnalysisError;
use crate::archive::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoilTempError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

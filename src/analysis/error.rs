use thiserror::Error;

/// Everything that can go wrong during one analysis call.
///
/// The UI collapses all variants into one generic message; the variant and
/// its detail only reach the log.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service answered without any text payload
    #[error("empty response")]
    EmptyResponse,

    /// The payload was not valid JSON or did not match the result shape
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The request did not complete (network, auth, quota)
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Transport(err.to_string())
    }
}

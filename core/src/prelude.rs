use std::fmt;

/// Pipeline stage a run failed in, surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Credentials,
    Network,
    Authentication,
    Decode,
    Validation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Credentials => "credential resolution",
            Stage::Network => "network",
            Stage::Authentication => "authentication",
            Stage::Decode => "decode",
            Stage::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// A single record that broke a field contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Position of the record in the provider array.
    pub index: usize,
    /// `CDM_ID` of the record, when it could be read.
    pub cdm_id: Option<String>,
    /// Provider field name, or `record` for whole-record faults.
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(
        index: usize,
        cdm_id: Option<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            index,
            cdm_id,
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}", self.index)?;
        if let Some(cdm_id) = &self.cdm_id {
            write!(f, " (CDM {})", cdm_id)?;
        }
        write!(f, " field {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Common error type for a fetch-and-decode run.
#[derive(thiserror::Error, Debug)]
pub enum AlertError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider rejected the request (HTTP {status}): {body}")]
    AuthenticationOrQuery { status: u16, body: String },
    #[error("provider refused the login: {0}")]
    LoginRejected(String),
    #[error("could not parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
}

impl AlertError {
    pub fn stage(&self) -> Stage {
        match self {
            AlertError::Configuration(_) => Stage::Credentials,
            AlertError::Transport(_) => Stage::Network,
            AlertError::AuthenticationOrQuery { .. } | AlertError::LoginRejected(_) => {
                Stage::Authentication
            }
            AlertError::Decode(_) | AlertError::MalformedPayload(_) => Stage::Decode,
            AlertError::Validation(_) => Stage::Validation,
        }
    }
}

pub type AlertResult<T> = Result<T, AlertError>;

/// Anything that can answer a provider query with a raw response body.
pub trait CdmSource {
    fn fetch(&self, query: &str) -> AlertResult<Vec<u8>>;
}

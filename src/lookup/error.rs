use strum_macros::Display;
use thiserror::Error;

use crate::lookup::fetch::FetchError;
use crate::lookup::types::Coordinates;

/// Which step of the lookup chain a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(to_string = "IP")]
    Ip,
    #[strum(to_string = "coordinates")]
    Coordinates,
    #[strum(to_string = "ISS pass times")]
    PassTimes,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request for {stage} failed: {message}")]
    Transport { stage: Stage, message: String },
    #[error("Status Code {code} when fetching {stage}: {body}")]
    HttpStatus { stage: Stage, code: u16, body: String },
    #[error("malformed response when fetching {stage}: {message}")]
    MalformedResponse { stage: Stage, message: String },
    #[error("Coordinates are invalid: {0} is outside the pass prediction range")]
    InvalidCoordinates(Coordinates),
}

impl LookupError {
    pub fn fetch(stage: Stage, err: FetchError) -> Self {
        match err {
            FetchError::Transport(message) => LookupError::Transport { stage, message },
            FetchError::Status { code, body } => LookupError::HttpStatus { stage, code, body },
        }
    }

    pub fn malformed(stage: Stage, message: impl ToString) -> Self {
        LookupError::MalformedResponse {
            stage,
            message: message.to_string(),
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

//! Error handling for parameter extractors

use std::io;

/// Unified error to report failures during robot description parsing.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    WrongAngle(String),
    InvalidLength { expected: usize, found: usize },
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) => write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) => write!(f, "Parse Error: {}", msg),
            ParameterError::WrongAngle(ref msg) => {
                write!(f, "Wrong angle representation: {}", msg)
            }
            ParameterError::MissingField(ref field) => write!(f, "Missing Field: {}", field),
            ParameterError::InvalidLength { expected, found } => {
                write!(f, "Invalid Length: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}

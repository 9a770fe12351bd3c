use thiserror::Error;

/// Fatal error raised anywhere in the placement pipeline. Every
/// fallible entry point returns `Result<_, PlacementError>`; there are
/// no partial outputs on error.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("parse failure: {0}")]
    ParseFailure(String),
    #[error("cannot fit all pins: retry loop cannot make progress")]
    CannotFit,
    #[error("no slot for floating (zero-sink) pin")]
    NoSlotForFloatingPin,
}

impl PartialEq for PlacementError {
    fn eq(&self, other: &Self) -> bool {
        use PlacementError::*;
        match (self, other) {
            (InvalidConfiguration(a), InvalidConfiguration(b)) => a == b,
            (InvalidGeometry(a), InvalidGeometry(b)) => a == b,
            (ParseFailure(a), ParseFailure(b)) => a == b,
            (CannotFit, CannotFit) => true,
            (NoSlotForFloatingPin, NoSlotForFloatingPin) => true,
            _ => false,
        }
    }
}

impl From<PlacementError> for String {
    fn from(e: PlacementError) -> Self {
        e.to_string()
    }
}

pub type Result<T> = core::result::Result<T, PlacementError>;

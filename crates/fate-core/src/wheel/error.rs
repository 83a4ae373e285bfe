use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FateError {
    #[error("Cannot trace an empty wheel")]
    EmptyWheel,
}

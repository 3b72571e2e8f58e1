//! Error types for prime generation and key exchange

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DhError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Exhausted retries after {attempts} attempts")]
    ExhaustedRetries { attempts: u64 },
}

pub type Result<T> = std::result::Result<T, DhError>;

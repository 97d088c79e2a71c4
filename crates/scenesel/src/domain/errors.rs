//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("add and remove cannot be requested together")]
    ConflictingModes,
}

//! Runtime error types for LS-8
//!
//! These are host-level failures. Faults raised by the program itself are
//! reported through [`Step::Fault`](crate::Step) and never surface here.

use thiserror::Error;
use ls8_spec::Ls8Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    SpecError(#[from] Ls8Error),

    #[error("Failed to write program output")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

//! Loader errors

use std::path::PathBuf;
use thiserror::Error;
use ls8_spec::Ls8Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Line {line}: binary literal `{literal}` is wider than 8 bits")]
    LiteralTooWide { line: usize, literal: String },

    #[error("Line {line}: invalid hex byte `{token}`")]
    InvalidHexByte { line: usize, token: String },

    #[error("Line {line}: unexpected input `{text}`")]
    UnexpectedInput { line: usize, text: String },

    #[error("Line {line}: program image rejected")]
    Image {
        line: usize,
        #[source]
        source: Ls8Error,
    },

    #[error(transparent)]
    Spec(#[from] Ls8Error),

    #[error("Error opening file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Program file {} is not valid UTF-8 text", path.display())]
    NotText { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, LoaderError>;

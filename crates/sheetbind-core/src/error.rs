//! Error types for sheetbind.

use thiserror::Error;

/// Errors that can occur while loading a sheet source.
#[derive(Error, Debug)]
pub enum SheetBindError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SheetBindError>;

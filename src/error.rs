//! Crate-level error type and `Result` alias.
//!
//! Failures are scoped to one (image, index) unit by the pipeline; the
//! variants here carry enough context for a status line naming the unit.
use std::path::PathBuf;

use thiserror::Error;

use crate::processing::bands::{BandRole, ImageType};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Band shape mismatch: {band} is {found:?}, expected {expected:?}")]
    ShapeMismatch {
        band: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Unknown index `{name}` for {image_type} images (valid: {valid})")]
    UnknownIndex {
        name: String,
        image_type: ImageType,
        valid: String,
    },

    #[error("Missing {role} band for {image_type} image")]
    MissingBand { role: BandRole, image_type: ImageType },

    #[error("Failed to write raster {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: gdal::errors::GdalError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Short, stable name of the failure class, used in status messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ShapeMismatch { .. } => "ShapeMismatch",
            Error::UnknownIndex { .. } => "UnknownIndex",
            Error::MissingBand { .. } => "MissingBand",
            Error::WriteFailure { .. } => "WriteFailure",
            Error::Io(_) => "IOError",
            Error::Gdal(_) => "GdalError",
            Error::Config(_) => "ConfigError",
            Error::InvalidRequest(_) => "InvalidRequest",
        }
    }
}

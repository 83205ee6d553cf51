use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or decode the country dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: simd_json::Error,
    },

    #[error("dataset {path} is not a JSON array of countries")]
    NotAnArray { path: PathBuf },
}

/// Failure to write an SVG export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to export: no dataset is loaded")]
    NoChart,
}

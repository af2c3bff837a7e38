use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustStoreError {
    #[error("Unable to read trust store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Certificate parsing error: {0}")]
    CertificateParsingError(String),
    #[error("Certificate encoding error: {0}")]
    EncodingError(String),
}

impl TrustStoreError {
    /// Process exit code for errors that end a run.
    ///
    /// Per-certificate errors are contained by the pipeline and have none.
    pub fn exit_code(&self) -> Option<u8> {
        match self {
            TrustStoreError::Read { .. } => Some(1),
            TrustStoreError::Write { .. } => Some(2),
            TrustStoreError::CertificateParsingError(_) | TrustStoreError::EncodingError(_) => None,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrustStoreError::Write {
            path: path.into(),
            source,
        }
    }
}

pub mod cleaner;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod models;
pub mod persistence;
pub mod validity;

pub use cleaner::{CertificateCleaner, CleanupReport, RejectedCertificate};
pub use decoder::{DecodedBlock, PemDecoder};
pub use encoder::{TrustStoreDocument, TrustStoreDocumentBuilder};
pub use error::TrustStoreError;
pub use models::CertificateRecord;
pub use validity::{RejectionReason, ValidityVerdict, check_validity};

pub mod trust_store;

// Re-export commonly used types
pub use trust_store::{CertificateCleaner, CleanupReport, TrustStoreError};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::config::OutputConfig;
use crate::pki::trust_store::decoder::{DecodedBlock, PemDecoder};
use crate::pki::trust_store::encoder::{TrustStoreDocument, TrustStoreDocumentBuilder};
use crate::pki::trust_store::error::TrustStoreError;
use crate::pki::trust_store::persistence::{backup_file, write_file};
use crate::pki::trust_store::validity::{RejectionReason, ValidityVerdict, check_validity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedCertificate {
    pub subject: String,
    pub reason: RejectionReason,
}

/// What happened to every block of a trust store during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Subjects written to the cleaned store, in output order.
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedCertificate>,
    /// Subjects that passed validation but could not be re-encoded.
    pub encode_failures: Vec<String>,
    pub ignored: usize,
    pub malformed: usize,
}

/// Removes expired and not yet valid certificates from a PEM trust store.
pub struct CertificateCleaner {
    config: OutputConfig,
}

impl CertificateCleaner {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Path of the base64 artifact for a given trust store.
    pub fn base64_path(&self, path: &Path) -> PathBuf {
        append_suffix(path, &self.config.base64_suffix)
    }

    /// Run the whole pipeline over an in-memory PEM stream.
    pub fn clean_pem(
        &self,
        input: &[u8],
        now: DateTime<Utc>,
    ) -> (TrustStoreDocument, CleanupReport) {
        let mut report = CleanupReport::default();
        let mut builder = TrustStoreDocumentBuilder::new();

        for block in PemDecoder::new(input) {
            let record = match block {
                DecodedBlock::Certificate(record) => record,
                DecodedBlock::Ignored { index, label } => {
                    debug!("Skipping {label} object at block {index}");
                    report.ignored += 1;
                    continue;
                }
                DecodedBlock::Malformed { index, reason } => {
                    warn!("Skipping unreadable block {index}: {reason}");
                    report.malformed += 1;
                    continue;
                }
            };

            match check_validity(&record, now) {
                ValidityVerdict::Accepted => {
                    info!("{}", record.validity_window());
                }
                ValidityVerdict::Rejected(reason) => {
                    warn!(
                        "Certificate Subject: {} is invalid! ({reason}, valid {})",
                        record.subject,
                        record.validity_window()
                    );
                    report.rejected.push(RejectedCertificate {
                        subject: record.subject,
                        reason,
                    });
                    continue;
                }
            }

            match builder.push(&record) {
                Ok(()) => {
                    info!("Processed <{}>", record.subject);
                    report.accepted.push(record.subject);
                }
                Err(e) => {
                    error!("Error processing {}: {e}", record.subject);
                    report.encode_failures.push(record.subject);
                }
            }
        }

        (builder.finish(), report)
    }

    /// Clean the trust store at `path` in place and write `<path><suffix>`
    /// with the base64 form of the result.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn clean_file(
        &self,
        path: &Path,
        now: DateTime<Utc>,
    ) -> Result<CleanupReport, TrustStoreError> {
        info!("Reading TrustStore: {}", path.display());
        let input = fs::read(path).map_err(|source| TrustStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (document, report) = self.clean_pem(&input, now);

        if self.config.backup {
            backup_file(path, &append_suffix(path, ".bak"))?;
        }
        write_file(path, document.pem().as_bytes(), self.config.atomic_replace)?;

        let b64_path = self.base64_path(path);
        write_file(
            &b64_path,
            document.to_base64().as_bytes(),
            self.config.atomic_replace,
        )?;

        info!(
            "Kept {} of {} certificates ({} rejected, {} malformed, {} failed to encode)",
            document.certificate_count(),
            report.accepted.len()
                + report.rejected.len()
                + report.encode_failures.len()
                + report.malformed,
            report.rejected.len(),
            report.malformed,
            report.encode_failures.len()
        );
        Ok(report)
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

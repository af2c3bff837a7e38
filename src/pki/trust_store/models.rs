use std::fmt;

use chrono::{DateTime, Utc};
use x509_parser::prelude::{ASN1Time, FromDer, X509Certificate};

use crate::pki::trust_store::error::TrustStoreError;

/// A certificate decoded from one PEM block of the trust store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    /// Position of the originating PEM block in the input stream.
    pub index: usize,
    pub der: Vec<u8>,
    pub subject: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

pub fn asn1_time_to_chrono(asn1_time: ASN1Time) -> Result<DateTime<Utc>, TrustStoreError> {
    DateTime::<Utc>::from_timestamp(asn1_time.timestamp(), 0).ok_or_else(|| {
        TrustStoreError::CertificateParsingError(format!(
            "Validity time out of range: {asn1_time}"
        ))
    })
}

impl CertificateRecord {
    /// Parse a single DER encoded certificate.
    ///
    /// Trailing bytes after the certificate structure are rejected.
    pub fn from_der(index: usize, der: Vec<u8>) -> Result<Self, TrustStoreError> {
        let (rem, x509_cert) = X509Certificate::from_der(&der).map_err(|e| {
            TrustStoreError::CertificateParsingError(format!("DER parsing failed: {e}"))
        })?;

        if !rem.is_empty() {
            return Err(TrustStoreError::CertificateParsingError(
                "Certificate contains unparsed data after DER".to_string(),
            ));
        }

        let subject = x509_cert.subject().to_string();
        let not_before = asn1_time_to_chrono(x509_cert.validity().not_before)?;
        let not_after = asn1_time_to_chrono(x509_cert.validity().not_after)?;

        Ok(Self {
            index,
            der,
            subject,
            not_before,
            not_after,
        })
    }

    pub fn validity_window(&self) -> ValidityWindow<'_> {
        ValidityWindow(self)
    }
}

/// Renders `[not_before, not_after]` in GMT form, e.g. `[1 Jan 2000 00:00:00 GMT, ...]`.
pub struct ValidityWindow<'a>(&'a CertificateRecord);

const GMT_FORMAT: &str = "%-d %b %Y %H:%M:%S GMT";

impl fmt::Display for ValidityWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.0.not_before.format(GMT_FORMAT),
            self.0.not_after.format(GMT_FORMAT)
        )
    }
}

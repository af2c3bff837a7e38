use base64::{Engine as _, engine::general_purpose};

use crate::pki::trust_store::error::TrustStoreError;
use crate::pki::trust_store::models::CertificateRecord;

pub const PEM_HEADER: &str = "-----BEGIN CERTIFICATE-----\n";
pub const PEM_TRAILER: &str = "-----END CERTIFICATE-----\n";
pub const LINE_WIDTH: usize = 64;

/// Split `body` into lines of at most `width` characters, each terminated by `\n`.
pub fn wrap_lines(body: &str, width: usize) -> Result<String, TrustStoreError> {
    if width == 0 {
        return Err(TrustStoreError::EncodingError(
            "line width must be positive".to_string(),
        ));
    }
    let mut wrapped = String::with_capacity(body.len() + body.len() / width + 1);
    for chunk in body.as_bytes().chunks(width) {
        let line = std::str::from_utf8(chunk).map_err(|e| {
            TrustStoreError::EncodingError(format!("line break inside a character: {e}"))
        })?;
        wrapped.push_str(line);
        wrapped.push('\n');
    }
    Ok(wrapped)
}

/// Render DER bytes as one complete PEM certificate block.
pub fn render_pem_block(der: &[u8]) -> Result<String, TrustStoreError> {
    if der.is_empty() {
        return Err(TrustStoreError::EncodingError(
            "certificate has no DER content".to_string(),
        ));
    }
    let body = wrap_lines(&general_purpose::STANDARD.encode(der), LINE_WIDTH)?;

    let mut block = String::with_capacity(PEM_HEADER.len() + body.len() + PEM_TRAILER.len());
    block.push_str(PEM_HEADER);
    block.push_str(&body);
    block.push_str(PEM_TRAILER);
    Ok(block)
}

/// Append-only accumulator of rendered certificate blocks.
///
/// A block is stored only once it has been rendered completely, so a failing
/// record leaves the content gathered so far untouched.
#[derive(Debug, Default)]
pub struct TrustStoreDocumentBuilder {
    blocks: Vec<String>,
}

impl TrustStoreDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &CertificateRecord) -> Result<(), TrustStoreError> {
        let block = render_pem_block(&record.der)?;
        self.blocks.push(block);
        Ok(())
    }

    pub fn finish(self) -> TrustStoreDocument {
        TrustStoreDocument {
            certificates: self.blocks.len(),
            pem: self.blocks.concat(),
        }
    }
}

/// The cleaned trust store, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustStoreDocument {
    certificates: usize,
    pem: String,
}

impl TrustStoreDocument {
    pub fn pem(&self) -> &str {
        &self.pem
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates
    }

    /// The whole PEM text encoded as a single base64 blob.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.pem.as_bytes())
    }
}

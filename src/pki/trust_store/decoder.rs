use std::io::Cursor;

use x509_parser::pem::Pem;

use crate::pki::trust_store::models::CertificateRecord;

const CERTIFICATE_LABELS: [&str; 2] = ["CERTIFICATE", "X509 CERTIFICATE"];
const BEGIN_MARKER: &[u8] = b"-----BEGIN ";
const END_MARKER: &[u8] = b"-----END ";

/// Outcome of decoding one PEM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBlock {
    Certificate(CertificateRecord),
    /// A well-formed PEM object that is not a certificate, e.g. key material.
    Ignored { index: usize, label: String },
    Malformed { index: usize, reason: String },
}

/// Lazily splits a PEM stream into decoded blocks, in stream order.
///
/// Text between blocks is skipped. A broken block is reported as
/// [`DecodedBlock::Malformed`] and decoding resumes after it. A block without
/// an END line ends where the next BEGIN line starts.
pub struct PemDecoder<'a> {
    input: &'a [u8],
    pos: usize,
    index: usize,
}

/// Lines of `input` starting at byte offset `from`, with their offsets.
fn lines_from(input: &[u8], from: usize) -> impl Iterator<Item = (usize, &[u8])> {
    let mut offset = from;
    input[from..]
        .split_inclusive(|&b| b == b'\n')
        .map(move |line| {
            let start = offset;
            offset += line.len();
            (start, line)
        })
}

impl<'a> PemDecoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            index: 0,
        }
    }

    fn decode_frame(&self, frame: &[u8]) -> DecodedBlock {
        match Pem::read(Cursor::new(frame)) {
            Ok((pem, _)) => self.classify(pem),
            Err(e) => self.malformed(format!("PEM decoding failed: {e}")),
        }
    }

    fn malformed(&self, reason: String) -> DecodedBlock {
        DecodedBlock::Malformed {
            index: self.index,
            reason,
        }
    }

    fn classify(&self, pem: Pem) -> DecodedBlock {
        let index = self.index;
        if !CERTIFICATE_LABELS.contains(&pem.label.as_str()) {
            return DecodedBlock::Ignored {
                index,
                label: pem.label,
            };
        }
        match CertificateRecord::from_der(index, pem.contents) {
            Ok(record) => DecodedBlock::Certificate(record),
            Err(e) => DecodedBlock::Malformed {
                index,
                reason: e.to_string(),
            },
        }
    }
}

impl Iterator for PemDecoder<'_> {
    type Item = DecodedBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        let mut lines = lines_from(input, self.pos);

        let Some((begin, _)) = lines
            .by_ref()
            .find(|(_, l)| l.starts_with(BEGIN_MARKER))
        else {
            self.pos = input.len();
            return None;
        };

        let boundary =
            lines.find(|(_, l)| l.starts_with(BEGIN_MARKER) || l.starts_with(END_MARKER));
        let block = match boundary {
            Some((start, line)) if line.starts_with(END_MARKER) => {
                self.pos = start + line.len();
                self.decode_frame(&input[begin..self.pos])
            }
            Some((next_begin, _)) => {
                self.pos = next_begin;
                self.malformed("PEM block has no END line before the next BEGIN line".to_string())
            }
            None => {
                self.pos = input.len();
                self.malformed("PEM block has no END line".to_string())
            }
        };
        self.index += 1;
        Some(block)
    }
}

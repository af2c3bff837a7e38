#![allow(dead_code)]

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair, date_time_ymd};

/// A freshly generated self-signed certificate in both encodings.
pub struct TestCert {
    pub pem: String,
    pub der: Vec<u8>,
}

pub fn gen_cert(common_name: &str, not_before: (i32, u8, u8), not_after: (i32, u8, u8)) -> TestCert {
    let mut params = CertificateParams::default();
    let key_pair = KeyPair::generate().unwrap();

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    params.distinguished_name = dn;

    params.not_before = date_time_ymd(not_before.0, not_before.1, not_before.2);
    params.not_after = date_time_ymd(not_after.0, not_after.1, not_after.2);

    let cert = params.self_signed(&key_pair).unwrap();
    TestCert {
        pem: cert.pem(),
        der: cert.der().to_vec(),
    }
}

pub fn valid_cert(common_name: &str) -> TestCert {
    gen_cert(common_name, (2000, 1, 1), (2999, 1, 1))
}

pub fn expired_cert(common_name: &str) -> TestCert {
    gen_cert(common_name, (1999, 1, 1), (2000, 1, 1))
}

pub fn private_key_pem() -> String {
    KeyPair::generate().unwrap().serialize_pem()
}

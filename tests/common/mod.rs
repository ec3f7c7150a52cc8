//! Shared fixtures for integration tests.
//!
//! Keys and self-signed certificates are generated with OpenSSL on the fly;
//! nothing is read from disk.

#![allow(dead_code)]

use cms::signed_data::{SignedData, SignerInfo};
use kmod_signer::{certificate_from_openssl, OpenSslModuleSigner, SignedModule};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::cms::{CMSOptions, CmsContentInfo};
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::stack::Stack;
use openssl::x509::{X509Builder, X509NameBuilder, X509};
use x509_cert::Certificate;

pub struct TestKey {
    pub pkey: PKey<Private>,
    pub x509: X509,
    pub certificate: Certificate,
}

impl TestKey {
    pub fn signer(&self) -> OpenSslModuleSigner {
        OpenSslModuleSigner::new(self.pkey.clone()).expect("supported key")
    }
}

fn self_signed(pkey: PKey<Private>, digest: MessageDigest, serial: u32) -> TestKey {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("O", "kmod-signer tests").unwrap();
    name.append_entry_by_text("CN", "Module signing key").unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(serial).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder.sign(&pkey, digest).unwrap();
    let x509 = builder.build();

    let certificate = certificate_from_openssl(&x509).unwrap();
    TestKey {
        pkey,
        x509,
        certificate,
    }
}

pub fn rsa_2048() -> TestKey {
    let pkey = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
    self_signed(pkey, MessageDigest::sha256(), 0x00c0_ffee)
}

pub fn ecdsa(curve: Nid) -> TestKey {
    let group = EcGroup::from_curve_name(curve).unwrap();
    let pkey = PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap();
    self_signed(pkey, MessageDigest::sha256(), 0x0bad_cafe)
}

pub fn ed25519() -> TestKey {
    let pkey = PKey::generate_ed25519().unwrap();
    self_signed(pkey, MessageDigest::null(), 0x0000_ed25)
}

/// Split a signed module and decode its CMS blob.
pub fn parse_signed(module: &[u8]) -> (SignedModule<'_>, SignedData) {
    let signed = SignedModule::parse(module).expect("module trailer");
    let signed_data = signed.signed_data().expect("CMS SignedData");
    (signed, signed_data)
}

pub fn sole_signer_info(signed_data: &SignedData) -> &SignerInfo {
    let infos = signed_data.signer_infos.0.as_slice();
    assert_eq!(infos.len(), 1, "exactly one SignerInfo");
    &infos[0]
}

/// Detached CMS verification of `signature_der` over `payload` with OpenSSL,
/// trusting `cert` directly (no chain building).
pub fn openssl_verify_detached(signature_der: &[u8], payload: &[u8], cert: &X509) -> bool {
    let mut cms = CmsContentInfo::from_der(signature_der).expect("CMS parses");
    let mut certs = Stack::new().unwrap();
    certs.push(cert.clone()).unwrap();
    cms.verify(
        Some(&*certs),
        None,
        Some(payload),
        None,
        CMSOptions::BINARY | CMSOptions::NO_SIGNER_CERT_VERIFY,
    )
    .is_ok()
}

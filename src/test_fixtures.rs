//! Shared fixtures for unit tests: OpenSSL-generated keys with self-signed
//! certificates, and a scripted signer.

use std::cell::RefCell;
use std::sync::OnceLock;

use cms::content_info::ContentInfo;
use cms::signed_data::SignedData;
use der::{Decode, Encode};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509Builder, X509NameBuilder, X509};
use x509_cert::Certificate;

use crate::domain::crypto::{HashAlgorithm, KeyAlgorithm, ModuleSigner, SignRequest};
use crate::infra::error::{SigningError, SigningResult};

pub struct KeyFixture {
    pub pkey: PKey<Private>,
    pub x509: X509,
    pub certificate: Certificate,
}

fn build(pkey: PKey<Private>, digest: MessageDigest) -> KeyFixture {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "Build time autogenerated kernel key")
        .unwrap();
    let name = name.build();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    let serial = BigNum::from_u32(0x1234_5678).unwrap().to_asn1_integer().unwrap();
    builder.set_serial_number(&serial).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(1).unwrap())
        .unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder.sign(&pkey, digest).unwrap();
    let x509 = builder.build();

    let certificate = Certificate::from_der(&x509.to_der().unwrap()).unwrap();
    KeyFixture {
        pkey,
        x509,
        certificate,
    }
}

pub fn rsa_2048() -> &'static KeyFixture {
    static FIXTURE: OnceLock<KeyFixture> = OnceLock::new();
    FIXTURE.get_or_init(fresh_rsa_2048)
}

pub fn fresh_rsa_2048() -> KeyFixture {
    let pkey = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
    build(pkey, MessageDigest::sha256())
}

pub fn ec(curve: Nid) -> KeyFixture {
    let group = EcGroup::from_curve_name(curve).unwrap();
    let pkey = PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap();
    build(pkey, MessageDigest::sha256())
}

pub fn ed25519() -> KeyFixture {
    let pkey = PKey::generate_ed25519().unwrap();
    build(pkey, MessageDigest::null())
}

pub fn decode_signed_data(der: &[u8]) -> SignedData {
    let ci = ContentInfo::from_der(der).unwrap();
    ci.content.decode_as::<SignedData>().unwrap()
}

fn spki_der(fixture: &KeyFixture) -> Vec<u8> {
    fixture
        .certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .unwrap()
}

type SeenRequest = (HashAlgorithm, Vec<u8>, Vec<u8>);

/// Returns a canned signature and records what it was asked to sign.
///
/// Claims the public key of the given fixture's certificate.
pub struct FixedSigner {
    key: KeyAlgorithm,
    public_key: Vec<u8>,
    signature: Option<Vec<u8>>,
    last: RefCell<Option<SeenRequest>>,
}

impl FixedSigner {
    pub fn new(fixture: &KeyFixture, key: KeyAlgorithm, signature: Vec<u8>) -> Self {
        Self {
            key,
            public_key: spki_der(fixture),
            signature: Some(signature),
            last: RefCell::new(None),
        }
    }

    pub fn failing(fixture: &KeyFixture, key: KeyAlgorithm) -> Self {
        Self {
            key,
            public_key: spki_der(fixture),
            signature: None,
            last: RefCell::new(None),
        }
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.last.borrow().clone()
    }
}

impl ModuleSigner for FixedSigner {
    fn key_algorithm(&self) -> KeyAlgorithm {
        self.key
    }

    fn public_key_der(&self) -> SigningResult<Vec<u8>> {
        Ok(self.public_key.clone())
    }

    fn sign(&self, request: &SignRequest<'_>) -> SigningResult<Vec<u8>> {
        *self.last.borrow_mut() = Some((
            request.hash_algorithm(),
            request.digest().as_slice().to_vec(),
            request.message().to_vec(),
        ));
        self.signature
            .clone()
            .ok_or_else(|| SigningError::IoError("token removed".into()))
    }
}

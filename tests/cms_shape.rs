//! Shape of the CMS SignedData carried in signed modules.

mod common;

use der::asn1::ObjectIdentifier;
use kmod_signer::{
    sign_module_attached, ModuleSigningService, SignatureOidPolicy, SigningOptions,
};
use openssl::nid::Nid;

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const SHA256_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
const ID_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");
const ID_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
const ID_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
const ID_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");
const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
const ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
const ECDSA_WITH_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4");
const ID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

#[test]
fn rsa_signed_data_has_kernel_shape() {
    let key = common::rsa_2048();
    let out = sign_module_attached(&key.signer(), &key.certificate, b"module").unwrap();
    let (_, signed_data) = common::parse_signed(&out);

    assert!(signed_data.certificates.is_none());
    assert!(signed_data.crls.is_none());
    assert_eq!(signed_data.encap_content_info.econtent_type, ID_DATA);
    assert!(signed_data.encap_content_info.econtent.is_none());
    assert_eq!(signed_data.digest_algorithms.len(), 1);
    assert_eq!(signed_data.digest_algorithms.as_slice()[0].oid, ID_SHA256);

    let si = common::sole_signer_info(&signed_data);
    assert!(si.signed_attrs.is_none());
    assert!(si.unsigned_attrs.is_none());
    assert_eq!(si.digest_alg.oid, ID_SHA256);
    assert_eq!(si.signature_algorithm.oid, RSA_ENCRYPTION);
    assert_ne!(si.signature_algorithm.oid, SHA256_WITH_RSA);
    assert_eq!(si.signature.as_bytes().len(), 256);
}

#[test]
fn signer_is_identified_by_issuer_and_serial() {
    let key = common::rsa_2048();
    let out = sign_module_attached(&key.signer(), &key.certificate, b"module").unwrap();
    let (_, signed_data) = common::parse_signed(&out);

    match &common::sole_signer_info(&signed_data).sid {
        cms::signed_data::SignerIdentifier::IssuerAndSerialNumber(ias) => {
            assert_eq!(ias.issuer, key.certificate.tbs_certificate.issuer);
            assert_eq!(
                ias.serial_number,
                key.certificate.tbs_certificate.serial_number
            );
        }
        other => panic!("unexpected signer identifier {other:?}"),
    }
}

#[test]
fn hash_specific_policy_is_opt_in() {
    let key = common::rsa_2048();
    let service = ModuleSigningService::new(SigningOptions {
        signature_oid_policy: SignatureOidPolicy::HashSpecific,
        ..SigningOptions::default()
    });
    let composite = service
        .sign_attached(&key.signer(), &key.certificate, b"module")
        .unwrap();
    let (_, signed_data) = common::parse_signed(&composite);
    assert_eq!(
        common::sole_signer_info(&signed_data).signature_algorithm.oid,
        SHA256_WITH_RSA
    );

    // A later default call is unaffected by the earlier option.
    let generic = sign_module_attached(&key.signer(), &key.certificate, b"module").unwrap();
    let (_, signed_data) = common::parse_signed(&generic);
    assert_eq!(
        common::sole_signer_info(&signed_data).signature_algorithm.oid,
        RSA_ENCRYPTION
    );
}

#[test]
fn ecdsa_digest_follows_curve() {
    for (curve, digest, sig_alg) in [
        (Nid::X9_62_PRIME256V1, ID_SHA256, ECDSA_WITH_SHA256),
        (Nid::SECP384R1, ID_SHA384, ECDSA_WITH_SHA384),
        (Nid::SECP521R1, ID_SHA512, ECDSA_WITH_SHA512),
    ] {
        let key = common::ecdsa(curve);
        let out = sign_module_attached(&key.signer(), &key.certificate, b"module").unwrap();
        let (_, signed_data) = common::parse_signed(&out);

        let si = common::sole_signer_info(&signed_data);
        assert_eq!(si.digest_alg.oid, digest);
        assert_eq!(si.signature_algorithm.oid, sig_alg);
        assert!(si.signature_algorithm.parameters.is_none());
        assert!(si.signed_attrs.is_none());
        assert!(signed_data.certificates.is_none());
    }
}

#[test]
fn ed25519_uses_pure_eddsa_identifier() {
    let key = common::ed25519();
    let out = sign_module_attached(&key.signer(), &key.certificate, b"module").unwrap();
    let (signed, signed_data) = common::parse_signed(&out);

    let si = common::sole_signer_info(&signed_data);
    assert_eq!(si.digest_alg.oid, ID_SHA512);
    assert_eq!(si.signature_algorithm.oid, ID_ED25519);
    assert_eq!(si.signature.as_bytes().len(), 64);

    // No signed attributes: the signature covers the module bytes directly.
    let public_key = key.x509.public_key().unwrap();
    let mut verifier = openssl::sign::Verifier::new_without_digest(&public_key).unwrap();
    assert!(verifier
        .verify_oneshot(si.signature.as_bytes(), signed.unsigned_payload())
        .unwrap());
}

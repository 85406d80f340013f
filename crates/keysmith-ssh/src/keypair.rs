// ABOUTME: In-memory key pair generation for RSA, Ed25519, and ECDSA.
// ABOUTME: Encodes private keys as PKCS8 PEM and public keys in OpenSSH format.

use crate::algorithm::{EcdsaCurve, KeyParams, RSA_EXPONENT};
use crate::error::{KeygenError, Result};
use ed25519_dalek::SigningKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use pkcs8::{EncodePrivateKey, LineEnding};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey};
use ssh_key::public::{EcdsaPublicKey, Ed25519PublicKey, KeyData, RsaPublicKey};
use ssh_key::{Mpint, PublicKey};
use std::fmt;
use zeroize::Zeroizing;

enum KeyMaterial {
    Rsa(Box<RsaPrivateKey>),
    Ed25519(SigningKey),
    EcdsaP256(p256::SecretKey),
    EcdsaP384(p384::SecretKey),
    EcdsaP521(p521::SecretKey),
}

/// A freshly generated private key and the parameters it was made with.
///
/// The secret types zeroize their memory on drop, and `Debug` never prints
/// key material.
pub struct KeyPair {
    params: KeyParams,
    material: KeyMaterial,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Generate a key pair for validated parameters using the OS random source.
///
/// # Errors
/// Returns `KeygenError::GenerationFailed` if the primitive rejects the
/// parameters or the entropy source is unavailable.
pub fn generate(params: &KeyParams) -> Result<KeyPair> {
    let mut rng = seeded_rng()?;
    generate_with_rng(params, &mut rng)
}

/// CSPRNG seeded from the OS. The primitives draw from this instead of
/// `OsRng` directly, because `OsRng` panics when the OS source fails.
fn seeded_rng() -> Result<StdRng> {
    let mut seed = Zeroizing::new([0u8; 32]);
    OsRng.try_fill_bytes(&mut seed[..]).map_err(|e| {
        KeygenError::GenerationFailed(format!("entropy source unavailable: {e}"))
    })?;
    Ok(StdRng::from_seed(*seed))
}

fn generate_with_rng(params: &KeyParams, rng: &mut StdRng) -> Result<KeyPair> {
    let material = match *params {
        KeyParams::Rsa { bits } => {
            let exponent = BigUint::from(RSA_EXPONENT);
            let key = RsaPrivateKey::new_with_exp(rng, bits, &exponent).map_err(|e| {
                KeygenError::GenerationFailed(format!("rsa {bits} bits: {e}"))
            })?;
            KeyMaterial::Rsa(Box::new(key))
        }
        KeyParams::Ed25519 => {
            let mut seed = Zeroizing::new([0u8; 32]);
            rng.fill_bytes(&mut seed[..]);
            KeyMaterial::Ed25519(SigningKey::from_bytes(&seed))
        }
        KeyParams::Ecdsa(EcdsaCurve::NistP256) => {
            KeyMaterial::EcdsaP256(p256::SecretKey::random(rng))
        }
        KeyParams::Ecdsa(EcdsaCurve::NistP384) => {
            KeyMaterial::EcdsaP384(p384::SecretKey::random(rng))
        }
        KeyParams::Ecdsa(EcdsaCurve::NistP521) => {
            KeyMaterial::EcdsaP521(p521::SecretKey::random(rng))
        }
    };

    Ok(KeyPair {
        params: *params,
        material,
    })
}

impl KeyPair {
    /// Parameters this pair was generated with.
    pub fn params(&self) -> KeyParams {
        self.params
    }

    /// Encode the private key as PKCS8 PEM.
    ///
    /// An empty passphrase yields a plain `PRIVATE KEY` block. Otherwise the
    /// key is wrapped in an `ENCRYPTED PRIVATE KEY` block (PBES2 with scrypt
    /// and AES-256-CBC).
    ///
    /// # Errors
    /// Returns `KeygenError::SerializeKey` if DER or PEM encoding fails, or
    /// `KeygenError::GenerationFailed` if no salt can be drawn.
    pub fn to_pkcs8_pem(&self, passphrase: &str) -> Result<Zeroizing<String>> {
        match &self.material {
            KeyMaterial::Rsa(key) => encode_pkcs8(&**key, passphrase),
            KeyMaterial::Ed25519(key) => encode_pkcs8(key, passphrase),
            KeyMaterial::EcdsaP256(key) => encode_pkcs8(key, passphrase),
            KeyMaterial::EcdsaP384(key) => encode_pkcs8(key, passphrase),
            KeyMaterial::EcdsaP521(key) => encode_pkcs8(key, passphrase),
        }
    }

    /// Public half of the pair as an `ssh_key::PublicKey` carrying `comment`.
    ///
    /// # Errors
    /// Returns `KeygenError::EncodePublicKey` if the key cannot be expressed in
    /// SSH wire format.
    pub fn public_key(&self, comment: &str) -> Result<PublicKey> {
        Ok(PublicKey::new(self.key_data()?, clean_comment(comment)))
    }

    /// Single-line OpenSSH public key: `<type> <base64>[ <comment>]`.
    ///
    /// Control characters in the comment become spaces so the line stays a
    /// single line. The comment is then trimmed; a blank comment adds nothing,
    /// not even a space.
    ///
    /// # Errors
    /// Returns `KeygenError::EncodePublicKey` if encoding fails.
    pub fn to_openssh_public(&self, comment: &str) -> Result<String> {
        let mut line = PublicKey::new(self.key_data()?, "")
            .to_openssh()
            .map_err(KeygenError::EncodePublicKey)?;

        let comment = clean_comment(comment);
        if !comment.is_empty() {
            line.push(' ');
            line.push_str(&comment);
        }
        Ok(line)
    }

    fn key_data(&self) -> Result<KeyData> {
        let key_data = match &self.material {
            KeyMaterial::Rsa(key) => {
                let e = Mpint::from_positive_bytes(&key.e().to_bytes_be())
                    .map_err(KeygenError::EncodePublicKey)?;
                let n = Mpint::from_positive_bytes(&key.n().to_bytes_be())
                    .map_err(KeygenError::EncodePublicKey)?;
                KeyData::Rsa(RsaPublicKey { e, n })
            }
            KeyMaterial::Ed25519(key) => {
                KeyData::Ed25519(Ed25519PublicKey(key.verifying_key().to_bytes()))
            }
            KeyMaterial::EcdsaP256(key) => {
                ecdsa_key_data(key.public_key().to_encoded_point(false).as_bytes())?
            }
            KeyMaterial::EcdsaP384(key) => {
                ecdsa_key_data(key.public_key().to_encoded_point(false).as_bytes())?
            }
            KeyMaterial::EcdsaP521(key) => {
                ecdsa_key_data(key.public_key().to_encoded_point(false).as_bytes())?
            }
        };
        Ok(key_data)
    }
}

fn clean_comment(comment: &str) -> String {
    comment
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

fn ecdsa_key_data(sec1_point: &[u8]) -> Result<KeyData> {
    EcdsaPublicKey::from_sec1_bytes(sec1_point)
        .map(KeyData::Ecdsa)
        .map_err(KeygenError::EncodePublicKey)
}

fn encode_pkcs8(key: &impl EncodePrivateKey, passphrase: &str) -> Result<Zeroizing<String>> {
    let pem = if passphrase.is_empty() {
        key.to_pkcs8_pem(LineEnding::LF)
    } else {
        let mut rng = seeded_rng()?;
        key.to_pkcs8_encrypted_pem(&mut rng, passphrase, LineEnding::LF)
    };
    pem.map_err(KeygenError::SerializeKey)
}

// ABOUTME: Key algorithms and parameter validation.
// ABOUTME: Resolves an (algorithm, bits) request into a concrete KeyParams value.

use crate::error::{KeygenError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// RSA public exponent used for every generated key.
pub const RSA_EXPONENT: u32 = 65537;

/// Key algorithm requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    Ed25519,
    Ecdsa,
}

impl KeyAlgorithm {
    /// All algorithms, in the order front ends should list them.
    pub const ALL: [KeyAlgorithm; 3] = [
        KeyAlgorithm::Ed25519,
        KeyAlgorithm::Rsa,
        KeyAlgorithm::Ecdsa,
    ];

    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "rsa",
            KeyAlgorithm::Ed25519 => "ed25519",
            KeyAlgorithm::Ecdsa => "ecdsa",
        }
    }

    /// Bit lengths offered for this algorithm.
    ///
    /// RSA sizes are advisory: [`validate`] passes any RSA size through.
    pub fn supported_bits(&self) -> &'static [u32] {
        match self {
            KeyAlgorithm::Rsa => &[2048, 3072, 4096],
            KeyAlgorithm::Ed25519 => &[256],
            KeyAlgorithm::Ecdsa => &[256, 384, 521],
        }
    }

    /// Bit length used when the caller does not pick one.
    pub fn default_bits(&self) -> u32 {
        match self {
            KeyAlgorithm::Rsa => 4096,
            KeyAlgorithm::Ed25519 => 256,
            KeyAlgorithm::Ecdsa => 256,
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = KeygenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsa" => Ok(KeyAlgorithm::Rsa),
            "ed25519" => Ok(KeyAlgorithm::Ed25519),
            "ecdsa" => Ok(KeyAlgorithm::Ecdsa),
            _ => Err(KeygenError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// NIST curve used for an ECDSA key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    NistP256,
    NistP384,
    NistP521,
}

impl EcdsaCurve {
    /// Curve for an ECDSA bit length, if one exists.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            256 => Some(EcdsaCurve::NistP256),
            384 => Some(EcdsaCurve::NistP384),
            521 => Some(EcdsaCurve::NistP521),
            _ => None,
        }
    }

    /// Bit length of the curve's field, as accepted by [`validate`].
    pub fn bits(&self) -> u32 {
        match self {
            EcdsaCurve::NistP256 => 256,
            EcdsaCurve::NistP384 => 384,
            EcdsaCurve::NistP521 => 521,
        }
    }

    /// OpenSSH algorithm identifier, e.g. `ecdsa-sha2-nistp256`.
    pub fn ssh_identifier(&self) -> &'static str {
        match self {
            EcdsaCurve::NistP256 => "ecdsa-sha2-nistp256",
            EcdsaCurve::NistP384 => "ecdsa-sha2-nistp384",
            EcdsaCurve::NistP521 => "ecdsa-sha2-nistp521",
        }
    }
}

/// Concrete parameters for a single key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyParams {
    /// RSA with the given modulus length and exponent 65537.
    Rsa { bits: usize },
    Ed25519,
    Ecdsa(EcdsaCurve),
}

impl KeyParams {
    /// Algorithm family these parameters belong to.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            KeyParams::Rsa { .. } => KeyAlgorithm::Rsa,
            KeyParams::Ed25519 => KeyAlgorithm::Ed25519,
            KeyParams::Ecdsa(_) => KeyAlgorithm::Ecdsa,
        }
    }

    /// Effective key size in bits. Ed25519 is always 256.
    pub fn bits(&self) -> u32 {
        match self {
            KeyParams::Rsa { bits } => *bits as u32,
            KeyParams::Ed25519 => 256,
            KeyParams::Ecdsa(curve) => curve.bits(),
        }
    }

    /// OpenSSH algorithm identifier that prefixes the public key line.
    pub fn ssh_identifier(&self) -> &'static str {
        match self {
            KeyParams::Rsa { .. } => "ssh-rsa",
            KeyParams::Ed25519 => "ssh-ed25519",
            KeyParams::Ecdsa(curve) => curve.ssh_identifier(),
        }
    }
}

/// Resolve a requested bit length for `algorithm` into [`KeyParams`].
///
/// RSA sizes pass through untouched and Ed25519 ignores `bits`. ECDSA only
/// accepts 256, 384 and 521; anything else is rejected rather than mapped to
/// a default curve.
///
/// # Errors
/// Returns `KeygenError::UnsupportedKeySize` for an ECDSA size with no curve.
pub fn validate(algorithm: KeyAlgorithm, bits: u32) -> Result<KeyParams> {
    let params = match algorithm {
        KeyAlgorithm::Rsa => KeyParams::Rsa {
            bits: bits as usize,
        },
        KeyAlgorithm::Ed25519 => KeyParams::Ed25519,
        KeyAlgorithm::Ecdsa => EcdsaCurve::from_bits(bits)
            .map(KeyParams::Ecdsa)
            .ok_or(KeygenError::UnsupportedKeySize { algorithm, bits })?,
    };

    debug!(%algorithm, bits, ?params, "resolved key parameters");
    Ok(params)
}

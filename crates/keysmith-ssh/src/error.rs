// ABOUTME: Error types for key generation, persistence, and fingerprinting.
// ABOUTME: Path-carrying I/O variants plus a coarse ErrorKind for front ends.

use std::path::PathBuf;
use thiserror::Error;

use crate::algorithm::KeyAlgorithm;

/// Errors that can occur while generating, writing, or fingerprinting keys.
#[derive(Error, Debug)]
pub enum KeygenError {
    /// The requested key type is not one of rsa, ed25519, ecdsa.
    #[error("unsupported key type: '{0}'")]
    UnsupportedAlgorithm(String),

    /// The requested bit length has no parameter set for this algorithm.
    #[error("unsupported key size for {algorithm}: {bits} bits")]
    UnsupportedKeySize { algorithm: KeyAlgorithm, bits: u32 },

    /// The underlying primitive or the entropy source failed.
    #[error("failed to generate key: {0}")]
    GenerationFailed(String),

    /// Failed to encode the private key as PKCS8.
    #[error("failed to serialize private key: {0}")]
    SerializeKey(#[source] pkcs8::Error),

    /// Failed to encode the public key in OpenSSH format.
    #[error("failed to encode public key: {0}")]
    EncodePublicKey(#[source] ssh_key::Error),

    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a key file to disk.
    #[error("failed to write key to {path}: {source}")]
    WriteKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to restrict permissions on the private key file.
    #[error("failed to set permissions on {path}: {source}")]
    SetPermissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a public key file.
    #[error("failed to read public key from {path}: {source}")]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The public key file is not `<type> <base64> [comment]`.
    #[error("invalid public key format in {path}: {reason}")]
    InvalidPublicKeyFormat { path: PathBuf, reason: String },

    /// An in-memory public key line is not `<type> <base64> [comment]`.
    #[error("invalid public key format: {reason}")]
    InvalidPublicKeyLine { reason: String },
}

/// Coarse classification of [`KeygenError`] for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedAlgorithm,
    UnsupportedKeySize,
    GenerationFailed,
    Io,
    InvalidPublicKeyFormat,
}

impl KeygenError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeygenError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            KeygenError::UnsupportedKeySize { .. } => ErrorKind::UnsupportedKeySize,
            KeygenError::GenerationFailed(_)
            | KeygenError::SerializeKey(_)
            | KeygenError::EncodePublicKey(_) => ErrorKind::GenerationFailed,
            KeygenError::CreateDirectory { .. }
            | KeygenError::WriteKey { .. }
            | KeygenError::SetPermissions { .. }
            | KeygenError::ReadKey { .. } => ErrorKind::Io,
            KeygenError::InvalidPublicKeyFormat { .. }
            | KeygenError::InvalidPublicKeyLine { .. } => ErrorKind::InvalidPublicKeyFormat,
        }
    }
}

/// Result type alias using KeygenError.
pub type Result<T> = std::result::Result<T, KeygenError>;

// ABOUTME: One-call SSH key generation and the default locations it writes to.
// ABOUTME: Also hosts filename sanitizing and tilde expansion for caller input.

use crate::algorithm::{validate, KeyAlgorithm};
use crate::error::Result;
use crate::keypair::generate;
use crate::persist::{persist, KeyPaths};
use std::path::{Path, PathBuf};

/// Directory keys are written to when the caller does not choose one.
pub const DEFAULT_OUTPUT_DIR: &str = "~/.ssh";

/// Base filename used when the caller does not choose one.
pub const DEFAULT_FILENAME: &str = "id_ssh";

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Get the default output directory (~/.ssh).
pub fn default_output_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ssh"))
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

/// Make a user-supplied base filename safe to use on any platform.
///
/// Characters that Windows forbids are replaced with `_`, then whitespace and
/// leading/trailing dots are stripped. If nothing meaningful remains the
/// default `id_ssh` is returned.
pub fn sanitize_filename(filename: &str) -> String {
    let replaced: String = filename
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let sanitized = replaced.trim().trim_matches('.');
    if sanitized.trim_matches('_').is_empty() {
        return DEFAULT_FILENAME.to_string();
    }
    sanitized.to_string()
}

/// Generate an SSH key pair and write it to `output_dir`.
///
/// `key_type` is `rsa`, `ed25519`, or `ecdsa`. `bits` is the RSA modulus size
/// or the ECDSA curve size (256, 384, 521) and is ignored for Ed25519. A
/// leading `~` in `output_dir` is expanded. Writes `<filename>.pem` (PKCS8,
/// encrypted when `passphrase` is non-empty) and `<filename>.pub`.
///
/// # Errors
/// Returns `UnsupportedAlgorithm` or `UnsupportedKeySize` for bad input,
/// `GenerationFailed` if the primitive fails, and an I/O variant if the
/// files cannot be written.
pub fn generate_key(
    key_type: &str,
    bits: u32,
    comment: &str,
    passphrase: &str,
    output_dir: impl AsRef<Path>,
    filename: &str,
) -> Result<KeyPaths> {
    let algorithm: KeyAlgorithm = key_type.parse()?;
    let params = validate(algorithm, bits)?;
    let pair = generate(&params)?;
    persist(
        pair,
        &expand_path(output_dir),
        filename,
        comment,
        passphrase,
    )
}

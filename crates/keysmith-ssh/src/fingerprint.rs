// ABOUTME: OpenSSH-style SHA256 fingerprints of public keys.
// ABOUTME: Hashes the decoded key blob and renders it as SHA256:<unpadded base64>.

use crate::error::{KeygenError, Result};
use crate::key::expand_path;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Compute the fingerprint of the public key stored at `public_key_path`.
///
/// The file holds `<type> <base64-blob> [comment]`. Only the blob takes part
/// in the hash, so the result matches `ssh-keygen -l -E sha256` and does not
/// change when the comment does. A leading `~` in the path is expanded.
///
/// # Errors
/// Returns `KeygenError::ReadKey` if the file cannot be read as UTF-8 and
/// `KeygenError::InvalidPublicKeyFormat` if it is not a public key line.
pub fn get_fingerprint(public_key_path: impl AsRef<Path>) -> Result<String> {
    let path = expand_path(public_key_path.as_ref());
    let contents = std::fs::read_to_string(&path).map_err(|e| KeygenError::ReadKey {
        path: path.clone(),
        source: e,
    })?;

    fingerprint_line(&contents).map_err(|reason| KeygenError::InvalidPublicKeyFormat {
        path,
        reason,
    })
}

/// Compute the fingerprint of an in-memory OpenSSH public key line.
///
/// # Errors
/// Returns `KeygenError::InvalidPublicKeyLine` if `line` has fewer than two
/// fields or the blob is not valid base64.
pub fn fingerprint_openssh(line: &str) -> Result<String> {
    fingerprint_line(line).map_err(|reason| KeygenError::InvalidPublicKeyLine { reason })
}

fn fingerprint_line(line: &str) -> std::result::Result<String, String> {
    let mut fields = line.split_whitespace();
    let blob = match (fields.next(), fields.next()) {
        (Some(_algorithm), Some(blob)) => blob,
        _ => return Err("expected '<type> <base64> [comment]'".to_string()),
    };

    let key_bytes = STANDARD
        .decode(blob)
        .map_err(|e| format!("key blob is not valid base64: {e}"))?;

    let digest = Sha256::digest(&key_bytes);
    Ok(format!("SHA256:{}", STANDARD_NO_PAD.encode(digest)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssh_key::{HashAlg, PublicKey};
    use tempfile::TempDir;

    const KNOWN_KEY: &str =
        "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIO3mepiIGcR/X0pUqTHo4qI27NLDq/DXpX/C2m+nGcM9 test@example";
    const KNOWN_FINGERPRINT: &str = "SHA256:X0KiFE6EolWXQQYUQ/giYoU0YcJ1/rH7xQi3r8BYFO0";

    #[test]
    fn test_known_key_fingerprint() {
        let fp = fingerprint_openssh(KNOWN_KEY).expect("should fingerprint");
        assert_eq!(fp, KNOWN_FINGERPRINT);
    }

    #[test]
    fn test_fingerprint_format() {
        let fp = fingerprint_openssh(KNOWN_KEY).expect("should fingerprint");
        assert!(fp.starts_with("SHA256:"));
        // 32-byte digest is 43 base64 chars without padding
        assert_eq!(fp.len(), "SHA256:".len() + 43);
        assert!(!fp.ends_with('='));
    }

    #[test]
    fn test_fingerprint_matches_ssh_key_crate() {
        let expected = PublicKey::from_openssh(KNOWN_KEY)
            .expect("should parse")
            .fingerprint(HashAlg::Sha256)
            .to_string();
        let fp = fingerprint_openssh(KNOWN_KEY).expect("should fingerprint");
        assert_eq!(fp, expected);
    }

    #[test]
    fn test_comment_does_not_affect_fingerprint() {
        let without_comment = KNOWN_KEY.rsplit_once(' ').unwrap().0;
        let with_other_comment = format!("{without_comment} someone@else  extra words");

        let a = fingerprint_openssh(KNOWN_KEY).unwrap();
        let b = fingerprint_openssh(without_comment).unwrap();
        let c = fingerprint_openssh(&with_other_comment).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let padded = format!("\n\t  {KNOWN_KEY}  \n");
        assert_eq!(
            fingerprint_openssh(&padded).unwrap(),
            fingerprint_openssh(KNOWN_KEY).unwrap()
        );
    }

    #[test]
    fn test_single_token_is_invalid() {
        let err = fingerprint_openssh("invalidkeycontent").unwrap_err();
        assert!(matches!(err, KeygenError::InvalidPublicKeyLine { .. }));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let err = fingerprint_openssh("   \n").unwrap_err();
        assert!(matches!(err, KeygenError::InvalidPublicKeyLine { .. }));
    }

    #[test]
    fn test_bad_base64_is_invalid() {
        let err = fingerprint_openssh("ssh-ed25519 not*base64!").unwrap_err();
        assert!(matches!(err, KeygenError::InvalidPublicKeyLine { .. }));
    }

    #[test]
    fn test_in_memory_error_does_not_mention_a_path() {
        let err = fingerprint_openssh("invalidkeycontent").unwrap_err();
        let display = err.to_string();
        assert!(display.starts_with("invalid public key format: "));
        assert!(!display.contains(" in :"));
    }

    #[test]
    fn test_get_fingerprint_reports_path() {
        let temp_dir = TempDir::new().expect("should create temp dir");
        let path = temp_dir.path().join("invalid.pub");
        std::fs::write(&path, "invalidkeycontent").expect("should write file");

        match get_fingerprint(&path).unwrap_err() {
            KeygenError::InvalidPublicKeyFormat { path: reported, .. } => {
                assert_eq!(reported, path);
            }
            other => panic!("expected InvalidPublicKeyFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_get_fingerprint_missing_file() {
        let temp_dir = TempDir::new().expect("should create temp dir");
        let err = get_fingerprint(temp_dir.path().join("missing.pub")).unwrap_err();
        assert!(matches!(err, KeygenError::ReadKey { .. }));
    }
}

// ABOUTME: Writes an encoded key pair to disk as <name>.pem and <name>.pub.
// ABOUTME: Creates the output directory and keeps the private key at mode 0600.

use crate::error::{KeygenError, Result};
use crate::keypair::KeyPair;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Locations of the two files written for one key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPaths {
    /// PKCS8 PEM private key (`<filename>.pem`).
    pub private_key: PathBuf,
    /// OpenSSH public key line (`<filename>.pub`).
    pub public_key: PathBuf,
}

/// Encode `pair` and write both halves into `output_dir`.
///
/// Missing directories are created. The private key is encrypted when
/// `passphrase` is non-empty. The returned paths are absolute. The pair is
/// consumed so its secret material is dropped once encoding is done.
///
/// If the public key cannot be written, the private key file is removed again
/// so the two files only ever exist together.
///
/// # Errors
/// Returns an error if directory creation, encoding, writing, or restricting
/// the private key permissions fails.
pub fn persist(
    pair: KeyPair,
    output_dir: &Path,
    filename: &str,
    comment: &str,
    passphrase: &str,
) -> Result<KeyPaths> {
    fs::create_dir_all(output_dir).map_err(|e| KeygenError::CreateDirectory {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let output_dir = fs::canonicalize(output_dir).map_err(|e| KeygenError::CreateDirectory {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let private_key = output_dir.join(format!("{filename}.pem"));
    let public_key = output_dir.join(format!("{filename}.pub"));

    let params = pair.params();
    let private_pem = pair.to_pkcs8_pem(passphrase)?;
    let public_line = pair.to_openssh_public(comment)?;
    drop(pair);

    write_private_key(&private_key, private_pem.as_bytes())?;
    drop(private_pem);

    if let Err(e) = fs::write(&public_key, public_line.as_bytes()) {
        // A private key without its public half is never left behind.
        if let Err(cleanup) = fs::remove_file(&private_key) {
            warn!(path = %private_key.display(), error = %cleanup, "failed to remove private key");
        }
        return Err(KeygenError::WriteKey {
            path: public_key,
            source: e,
        });
    }

    info!(
        algorithm = %params.algorithm(),
        bits = params.bits(),
        key_type = params.ssh_identifier(),
        encrypted = !passphrase.is_empty(),
        private_key = %private_key.display(),
        public_key = %public_key.display(),
        "key pair written"
    );

    Ok(KeyPaths {
        private_key,
        public_key,
    })
}

/// Write private key bytes to a file that is never readable by others.
///
/// On Unix the file is created with mode 0600, and the mode is forced again on
/// the open handle so an existing file with looser bits is tightened before
/// any secret is written.
fn write_private_key(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |e| KeygenError::WriteKey {
        path: path.to_path_buf(),
        source: e,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| KeygenError::SetPermissions {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    file.write_all(contents).map_err(write_err)?;
    file.sync_all().map_err(write_err)
}

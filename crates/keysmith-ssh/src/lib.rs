// ABOUTME: SSH key pair generation, encoding, and fingerprinting.
// ABOUTME: Writes PKCS8 PEM private keys and OpenSSH public keys to disk.

//! # keysmith-ssh
//!
//! Generates RSA, Ed25519, and ECDSA key pairs and persists them in formats
//! standard SSH tooling understands.
//!
//! ## Features
//!
//! - **Validation**: Maps `(algorithm, bits)` to a concrete parameter set,
//!   rejecting ECDSA sizes that have no curve
//! - **Generation**: Uses the operating system's secure random source
//! - **Persistence**: PKCS8 PEM private key (optionally passphrase-encrypted,
//!   mode 0600 on Unix) and a single-line OpenSSH public key
//! - **Fingerprinting**: `SHA256:<base64>` exactly as `ssh-keygen -l` prints it
//!
//! ## Example
//!
//! ```no_run
//! use keysmith_ssh::{generate_key, get_fingerprint};
//!
//! let paths = generate_key("ed25519", 256, "me@laptop", "", "~/.ssh", "id_work")
//!     .expect("key should generate");
//! let fingerprint = get_fingerprint(&paths.public_key).expect("fingerprint should compute");
//! println!("{} ({})", paths.public_key.display(), fingerprint);
//! ```

mod algorithm;
mod error;
mod fingerprint;
mod key;
mod keypair;
mod persist;

// Re-export primary types and functions
pub use algorithm::{validate, EcdsaCurve, KeyAlgorithm, KeyParams, RSA_EXPONENT};
pub use error::{ErrorKind, KeygenError, Result};
pub use fingerprint::{fingerprint_openssh, get_fingerprint};
pub use key::{
    default_output_dir, expand_path, generate_key, sanitize_filename, DEFAULT_FILENAME,
    DEFAULT_OUTPUT_DIR,
};
pub use keypair::{generate, KeyPair};
pub use persist::{persist, KeyPaths};

// Re-export ssh_key types for convenience
pub use ssh_key::PublicKey;

// ABOUTME: Command implementations for the keysmith CLI
// ABOUTME: Resolves flags against config, then calls into keysmith-ssh

use anyhow::{Context, Result};
use colored::Colorize;
use keysmith_ssh::{sanitize_filename, KeyAlgorithm, KeyPaths};
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Environment variable holding the passphrase for `keysmith generate`.
pub const PASSPHRASE_ENV: &str = "KEYSMITH_PASSPHRASE";

/// Flags given to `keysmith generate`, before config defaults are applied.
#[derive(Debug, Default, Clone)]
pub struct GenerateOptions {
    pub key_type: Option<String>,
    pub bits: Option<u32>,
    pub comment: Option<String>,
    pub output_dir: Option<String>,
    pub filename: Option<String>,
    /// Passphrase taken from [`PASSPHRASE_ENV`]; never from argv
    pub passphrase: Option<String>,
    pub prompt_passphrase: bool,
}

/// A fully resolved generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub algorithm: KeyAlgorithm,
    pub bits: u32,
    pub comment: String,
    pub output_dir: String,
    pub filename: String,
}

impl GenerateOptions {
    /// Merge flags over `config`. Flags win; unset bits fall back to the
    /// algorithm's default size.
    pub fn resolve(&self, config: &Config) -> Result<GenerateRequest> {
        let key_type = self.key_type.as_deref().unwrap_or(&config.key_type);
        let algorithm: KeyAlgorithm = key_type
            .parse()
            .with_context(|| format!("Invalid key type '{key_type}'"))?;

        let bits = self
            .bits
            .or(config.bits)
            .unwrap_or_else(|| algorithm.default_bits());

        let filename = self.filename.as_deref().unwrap_or(&config.filename);

        Ok(GenerateRequest {
            algorithm,
            bits,
            comment: self
                .comment
                .clone()
                .or_else(|| config.comment.clone())
                .unwrap_or_default(),
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| config.output_dir.clone()),
            filename: sanitize_filename(filename),
        })
    }
}

/// `keysmith generate`
pub fn generate(options: GenerateOptions, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let request = options.resolve(&config)?;

    let passphrase = if options.prompt_passphrase {
        prompt_passphrase()?
    } else {
        options.passphrase.unwrap_or_default()
    };

    println!(
        "{} Generating {} key ({} bits)...",
        "[1/2]".dimmed(),
        request.algorithm.to_string().bold(),
        request.bits
    );

    let paths: KeyPaths = keysmith_ssh::generate_key(
        request.algorithm.as_str(),
        request.bits,
        &request.comment,
        &passphrase,
        &request.output_dir,
        &request.filename,
    )
    .context("Failed to generate SSH key")?;
    drop(passphrase);

    println!("{} Computing fingerprint...", "[2/2]".dimmed());
    let fingerprint =
        keysmith_ssh::get_fingerprint(&paths.public_key).context("Failed to compute fingerprint")?;

    println!();
    println!("{} SSH key generated!", "✓".green().bold());
    println!("  Private:     {}", paths.private_key.display());
    println!("  Public:      {}", paths.public_key.display());
    println!("  Fingerprint: {}", fingerprint.cyan());

    Ok(())
}

/// `keysmith fingerprint <path>`
pub fn fingerprint(path: PathBuf) -> Result<()> {
    let fingerprint = keysmith_ssh::get_fingerprint(&path)
        .with_context(|| format!("Failed to fingerprint {}", path.display()))?;
    println!("{fingerprint}");
    Ok(())
}

/// `keysmith algorithms`
pub fn algorithms() -> Result<()> {
    println!("{}", "Supported key types".bold());
    for algorithm in KeyAlgorithm::ALL {
        println!("  {}", describe_algorithm(algorithm));
    }
    Ok(())
}

fn describe_algorithm(algorithm: KeyAlgorithm) -> String {
    let sizes: Vec<String> = algorithm
        .supported_bits()
        .iter()
        .map(|bits| bits.to_string())
        .collect();
    format!(
        "{:<8} bits: {:<16} default: {}",
        algorithm.as_str(),
        sizes.join(", "),
        algorithm.default_bits()
    )
}

fn prompt_passphrase() -> Result<String> {
    dialoguer::Password::new()
        .with_prompt("Passphrase (empty for none)")
        .with_confirmation("Confirm passphrase", "Passphrases do not match")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read passphrase")
}

// ABOUTME: Entry point for the keysmith command-line tool
// ABOUTME: Generates SSH key pairs and prints public key fingerprints

use anyhow::Result;
use clap::{Parser, Subcommand};
use keysmith_cli::{commands, GenerateOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keysmith")]
#[command(about = "Generate SSH key pairs and fingerprints")]
#[command(version)]
struct Cli {
    /// Log everything at INFO instead of only keysmith's own events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    #[command(
        after_help = "The private key is encrypted with the passphrase in KEYSMITH_PASSPHRASE when it is set and non-empty."
    )]
    Generate {
        /// Key type: rsa, ed25519, or ecdsa
        #[arg(short = 't', long = "type")]
        key_type: Option<String>,

        /// Key size in bits (RSA modulus or ECDSA curve: 256, 384, 521)
        #[arg(short, long)]
        bits: Option<u32>,

        /// Comment appended to the public key (e.g., user@host)
        #[arg(short = 'C', long)]
        comment: Option<String>,

        /// Output directory (defaults to ~/.ssh)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Base filename for <name>.pem and <name>.pub (defaults to id_ssh)
        #[arg(short, long)]
        filename: Option<String>,

        /// Prompt for a passphrase to encrypt the private key (takes precedence
        /// over KEYSMITH_PASSPHRASE)
        #[arg(short = 'p', long)]
        passphrase_prompt: bool,

        /// Path to configuration file (defaults to ~/.config/keysmith/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the SHA256 fingerprint of a public key file
    Fingerprint {
        /// Path to the .pub file
        path: PathBuf,
    },

    /// List supported key types and sizes
    Algorithms,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        keysmith_log::init();
    } else {
        keysmith_log::init_for("keysmith_ssh");
    }

    match cli.command {
        Commands::Generate {
            key_type,
            bits,
            comment,
            output_dir,
            filename,
            passphrase_prompt,
            config,
        } => {
            let options = GenerateOptions {
                key_type,
                bits,
                comment,
                output_dir,
                filename,
                passphrase: std::env::var(commands::PASSPHRASE_ENV).ok(),
                prompt_passphrase: passphrase_prompt,
            };
            commands::generate(options, config.as_deref())
        }
        Commands::Fingerprint { path } => commands::fingerprint(path),
        Commands::Algorithms => commands::algorithms(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_passphrase_is_not_accepted_as_argument() {
        let result = Cli::try_parse_from(["keysmith", "generate", "--passphrase", "hunter2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "keysmith", "generate", "-t", "ecdsa", "-b", "384", "-C", "me@box", "-p",
        ])
        .expect("should parse");

        match cli.command {
            Commands::Generate {
                key_type,
                bits,
                comment,
                passphrase_prompt,
                ..
            } => {
                assert_eq!(key_type.as_deref(), Some("ecdsa"));
                assert_eq!(bits, Some(384));
                assert_eq!(comment.as_deref(), Some("me@box"));
                assert!(passphrase_prompt);
            }
            _ => panic!("expected generate command"),
        }
    }
}

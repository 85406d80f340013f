// ABOUTME: Shared logging setup for keysmith binaries
// ABOUTME: Two functions: init() for verbose stderr, init_for() for crate-filtered stderr

use tracing_subscriber::EnvFilter;

/// Standard logging to stderr. Default: INFO level, RUST_LOG override.
/// Used when the user asks for verbose output.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Crate-filtered logging to stderr. Default: INFO for named crate, WARN for everything else.
/// Keeps dependency chatter out of normal command output.
pub fn init_for(crate_name: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(crate_filter(crate_name))
        .with_writer(std::io::stderr)
        .init();
}

fn crate_filter(crate_name: &str) -> EnvFilter {
    let directive = format!("{crate_name}=info");
    EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into())
        .add_directive(
            directive
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        )
}

#[cfg(test)]
mod tests {
    #[test]
    fn exports_init() {
        let _ = super::init as fn();
    }

    #[test]
    fn exports_init_for() {
        let _ = super::init_for as fn(&str);
    }

    #[test]
    fn crate_filter_mentions_crate() {
        let filter = super::crate_filter("keysmith_ssh");
        assert!(filter.to_string().contains("keysmith_ssh=info"));
    }
}

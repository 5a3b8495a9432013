use tracing_subscriber::EnvFilter;

/// Initialize tracing for the CLI. `RUST_LOG` wins; otherwise warnings
/// and above, so resolver fail-open events reach the terminal without
/// drowning command output.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}

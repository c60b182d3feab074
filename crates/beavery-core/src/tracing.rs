use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize structured JSON tracing on stdout for services.
///
/// `RUST_LOG` wins over `default_directive` when set. Safe to call more than
/// once; later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(default_directive))
        .with(fmt::layer().json())
        .try_init();
}

/// Initialize compact human-readable tracing on stderr for interactive tools,
/// so log lines never interleave with prompts on stdout.
pub fn init_cli_tracing(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(default_directive))
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

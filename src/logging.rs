use tracing_subscriber::{EnvFilter, fmt};

/// Sends tracing output to stderr so it never mixes with command output.
///
/// `-v` raises the level to info, `-vv` to debug, `-vvv` to trace. Without
/// it `RUST_LOG` applies, falling back to warnings only.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A second init (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

use tracing_subscriber::filter::{Directive, EnvFilter, LevelFilter};

/// Stdout logging filtered by `RUST_LOG`, falling back to `default_level`.
pub fn init_logging(default_level: &str) {
    let directive: Directive = default_level
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    let filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(true)
        .try_init()
        .ok();
}

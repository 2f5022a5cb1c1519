use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize structured logging with environment-based filtering.
///
/// Defaults to INFO, and DEBUG for this crate; override with `RUST_LOG`,
/// e.g. `RUST_LOG=cupcake_corner=trace`.
pub fn init() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cupcake_corner=debug")),
        )
        .init();
}

use tracing_subscriber::EnvFilter;

/// Test-scoped tracing subscriber.
///
/// Hold the returned value for the duration of the test; dispatch logging
/// then shows up under `cargo test -- --nocapture`, with verbosity taken
/// from `RUST_LOG` (default `info`).
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .finish();
        Self {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}

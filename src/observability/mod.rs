pub mod metrics;

use lazy_static::lazy_static;
use metrics::Metrics;
use std::env;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

lazy_static! {
    pub static ref METRICS: Metrics = Metrics::new();
}

/// `RUST_LOG` filtering, `LOG_FORMAT=json` for structured output.
pub fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }
}

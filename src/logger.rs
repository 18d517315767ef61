use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Checked before `RUST_LOG`.
const LOG_ENV: &str = "TICKLOAD_LOG";

/// Directive used when no environment override is set. Dependencies stay at
/// `warn`; only this crate follows `--verbose`.
fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}

fn build_filter(verbose: bool, env_directive: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directive(verbose));
    env_directive.map_or_else(fallback, |directive| {
        EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!("Ignoring invalid log filter {:?}: {}", directive, err);
            fallback()
        })
    })
}

/// Installs the global subscriber. A second call leaves the first in place.
pub fn init_logging(verbose: bool) {
    let env_directive = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let filter = build_filter(verbose, env_directive.as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

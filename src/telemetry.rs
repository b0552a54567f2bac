//! Logging setup.
//!
//! LOG_LEVEL takes a tracing filter string: a bare level ("debug") or full
//! per-target directives ("info,mission=trace,practice=debug"). LOG_FORMAT
//! switches the human-readable output to JSON lines for log collectors.
//!
//! The HTTP TraceLayer adds its own per-request spans on top of this.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str =
    "info,mission=debug,practice=debug,nexuscoder_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // fmt() and fmt().json() build distinct subscriber types, so each arm
    // finishes its own builder instead of storing one.
    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

use std::{env, process};

use hackmyresume::cli::{execute, output};
use hackmyresume::exitcode;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    setup_logging();

    if let Err(e) = execute(env::args().collect()) {
        if e.is_fatal() {
            output::error(&e);
            process::exit(e.exit_code());
        }
        output::warning(&e);
        process::exit(exitcode::OK);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!("logging initialized");
}

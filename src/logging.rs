//! Diagnostics go to stderr or a log file; stdout carries trees and frames.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_writer(Arc::new(file)).try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    result.map_err(io::Error::other)
}

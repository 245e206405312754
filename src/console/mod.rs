mod runner;

use crate::config::Config;
use crate::controller::open_session;
use std::io;
use tracing::info;

pub use runner::{run_console, ConsoleCommand};

pub fn run_console_mode(config: &Config) -> io::Result<()> {
    info!(state = %config.state_path.display(), "console mode starting");

    let mut ui = open_session(config);

    let stdin = io::stdin();
    run_console(&mut ui, stdin.lock(), &mut io::stdout(), &mut io::stderr())
}

//! Framed JSON protocol for editor and GUI frontends.
//!
//! Each message is `Content-Length: N\r\n\r\n` followed by N bytes of JSON.
//! The frontend sends requests (`setInput`, `setOptions`, `newline`, `copy`,
//! `reset`, `scroll`, `render`, ...) and displays the `output` carried by
//! the `rendered` event that follows every state change.

mod protocol;
mod server;

use crate::config::Config;
use crate::controller::open_session;
use std::io;
use tracing::info;

pub use protocol::{ServeMessage, ServeMessageContent};
pub use server::ServeServer;

pub fn run_serve_mode(config: &Config) -> io::Result<()> {
    info!(state = %config.state_path.display(), "serve mode starting");

    // The frontend's `load` re-reads the store, which now holds the forced option.
    let ui = open_session(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut server = ServeServer::new(stdin.lock(), stdout.lock(), ui);
    server.run()?;

    info!("serve mode exiting");
    Ok(())
}

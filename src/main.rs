use anyhow::{Context, Result};
use clap::Parser;
use outline_tree::config::Config;
use outline_tree::controller::{JsonFileStore, KeyValueStore, DEFAULT_OUTLINE, INPUT_KEY, SLASH_KEY};
use outline_tree::{console, logging, render_with, serve, RenderOptions};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outline-tree")]
#[command(version)]
#[command(about = "Render an indented outline as a tree diagram")]
struct Cli {
    /// Outline file to render (default: stdin)
    file: Option<PathBuf>,

    /// Append `/` to lines inferred to be directories
    #[arg(short, long)]
    slash: bool,

    /// Treat a line that is exactly `/` as a root at any indent
    #[arg(long)]
    literal_root: bool,

    /// Render the input saved by the last console or serve session
    #[arg(long, conflicts_with = "file")]
    stored: bool,

    /// Start the interactive console
    #[arg(long, conflicts_with_all = ["serve", "file", "stored"])]
    console: bool,

    /// Speak the framed JSON protocol on stdin/stdout
    #[arg(long, conflicts_with_all = ["file", "stored"])]
    serve: bool,

    /// State file (default: ~/.config/outline-tree/state.json)
    #[arg(long, env = "OUTLINE_TREE_STATE", value_name = "PATH")]
    state: Option<PathBuf>,

    /// Append diagnostics to this file instead of stderr
    #[arg(long, env = "OUTLINE_TREE_LOG", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_file.as_deref())
        .context("failed to set up logging")?;

    let mut config = Config {
        append_slash: cli.slash,
        literal_root: cli.literal_root,
        ..Config::default()
    };
    if let Some(state) = &cli.state {
        config.state_path = state.clone();
    }

    if cli.serve {
        return serve::run_serve_mode(&config).context("serve mode failed");
    }
    if cli.console {
        return console::run_console_mode(&config).context("console mode failed");
    }

    let (text, append_slash) = if cli.stored {
        read_stored(&config)?
    } else if let Some(path) = &cli.file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        (text, config.append_slash)
    } else {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        (text, config.append_slash)
    };

    let options = RenderOptions {
        append_slash,
        literal_root: config.literal_root,
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(render_with(&text, &options).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Saved input (example outline when blank) and saved option, with `--slash`
/// forcing the option on.
fn read_stored(config: &Config) -> Result<(String, bool)> {
    let store = JsonFileStore::new(&config.state_path);
    let text = store
        .get(INPUT_KEY)?
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OUTLINE.to_string());
    let saved_slash = store.get(SLASH_KEY)?.as_deref() == Some("true");
    Ok((text, config.append_slash || saved_slash))
}

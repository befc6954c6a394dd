//! Rewind entrypoint: replays a session script and prints a history transcript.
use anyhow::{Context, Result, bail};
use clap::Parser;
use core_actions::{ScriptLine, ScriptParser, Session};
use core_config::load_from;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "rewind", version, about = "Replay an editing session through the undo history")]
struct Args {
    /// Session script to replay.
    pub script: PathBuf,
    /// Optional configuration file path (overrides discovery of `rewind.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Maximum history entries (0 = unbounded); overrides the config file.
    #[arg(long = "max-entries")]
    pub max_entries: Option<usize>,
    /// Initial text of the surface.
    #[arg(long = "text", default_value = "")]
    pub text: String,
    /// Log file written through the non-blocking appender.
    #[arg(long = "log-file", default_value = "rewind.log")]
    pub log_file: PathBuf,
}

fn configure_logging(log_file: &Path) -> Option<WorkerGuard> {
    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "rewind.log".into());
    if log_file.exists() {
        let _ = std::fs::remove_file(log_file);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let script = ScriptParser::parse(&src)
        .with_context(|| format!("parsing script {}", path.display()))?;
    tracing::debug!(target: "io", file = %path.display(), size_bytes = src.len(), steps = script.len(), "script_read_ok");
    Ok(script)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_file);
    install_panic_hook();
    info!(target: "runtime", "startup");

    let mut config = load_from(args.config.clone())?;
    if let Some(max) = args.max_entries {
        config.override_max_entries(max);
    }
    let script = load_script(&args.script)?;

    let limit = config.history_limit();
    info!(
        target: "runtime.startup",
        script = %args.script.display(),
        steps = script.len(),
        max_entries = limit.map(|n| n.get()),
        config_override = args.config.is_some(),
        "bootstrap_complete"
    );

    let mut session = Session::new(&args.text, limit);
    for line in &script {
        match session.dispatch(line) {
            Ok(report) => println!("{report}"),
            Err(e) => {
                error!(target: "runtime", line = e.line(), error = %e, "script_failed");
                bail!(e);
            }
        }
    }

    let history = session.history();
    println!(
        "-- {} steps, history {}/{}, {} evicted, {} availability changes",
        script.len(),
        history.cursor() + 1,
        history.len(),
        history.evicted(),
        session.availability_notifications()
    );
    info!(target: "runtime", "shutdown");
    Ok(())
}

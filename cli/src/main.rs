use clap::Parser;
mod app;
mod commands;
use commands::cli;
use duenotify_core::config::{self, LoggingConfig};
use duenotify_core::CliError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);
static CONSOLE_LOGGING: AtomicBool = AtomicBool::new(false);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit = match real_main().await {
        Ok(()) => 0,
        Err(e) => {
            report_failure(&e);
            e.exit_code()
        }
    };

    // process::exit skips destructors; flush the file writer first.
    release_log_guard();
    std::process::exit(exit);
}

fn report_failure(e: &CliError) {
    tracing::error!(error = %e, "reminder run failed");
    let console_logged =
        CONSOLE_LOGGING.load(Ordering::Relaxed) && tracing::enabled!(tracing::Level::ERROR);
    if needs_plain_stderr(console_logged) {
        eprintln!("{e}");
    }
}

/// The error reaches stderr exactly once: through the console log layer when
/// it is installed and lets errors through, otherwise as a plain line.
fn needs_plain_stderr(console_logged: bool) -> bool {
    !console_logged
}

fn release_log_guard() {
    if let Ok(mut guard) = LOG_GUARD.lock() {
        drop(guard.take());
    }
}

async fn real_main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let cfg = config::load(args.config.as_deref())?;
    init_tracing(&cfg.logging).map_err(CliError::Logging)?;

    let outcome = app::run_app(&args, &cfg).await?;
    println!("{}", app::render_outcome(&outcome));
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("duenotify"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender = tracing_appender::rolling::daily(dir, "duenotify.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        if let Ok(mut slot) = LOG_GUARD.lock() {
            *slot = Some(guard);
        }
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    // stdout carries the run summary; logs go to stderr.
    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    let console = console_layer.is_some();
    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
    CONSOLE_LOGGING.store(console, Ordering::Relaxed);

    Ok(())
}

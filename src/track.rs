//! `keytally track`: count presses in this terminal until stopped.

use crate::cli::TrackArgs;
use anyhow::Context;
use keytally_core::{
    config::Config, signals::forward_signals, LoadOutcome, Session, SessionSettings, SessionSummary, TallyStore,
};
use keytally_input::{terminal, TerminalOptions, TerminalSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// How long the runtime may take to wind down leftover blocking work.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

pub fn run(args: &TrackArgs, config: &Config) -> anyhow::Result<()> {
    let data_file = args.file.clone().unwrap_or_else(|| config.tracking.data_file.clone());
    let interval = args
        .interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| config.tracking.flush_interval());
    let options = TerminalOptions {
        exit_on_escape: config.tracking.exit_on_escape && !args.no_exit_key,
        enhanced_keyboard: config.tracking.enhanced_keyboard,
    };

    let store = Arc::new(TallyStore::new());
    report_load(&data_file, &store.load(&data_file));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let summary = runtime.block_on(async {
        let settings = SessionSettings::new(&data_file).flush_interval(interval);
        let session = Session::new(Arc::clone(&store), settings);

        let signals = tokio::spawn({
            let coordinator = session.coordinator();
            async move {
                if let Err(e) = forward_signals(coordinator).await {
                    tracing::warn!(error = %e, "could not listen for termination signals");
                }
            }
        });

        let stop_keys = if options.exit_on_escape { "Ctrl+c or Esc" } else { "Ctrl+c" };
        println!("keytally is running. Press {stop_keys} to stop.");

        terminal::install_panic_hook();
        let source = TerminalSource::open(options).context("failed to read keys from the terminal")?;
        if options.enhanced_keyboard && !source.is_enhanced() {
            // Raw mode is already on, so end the line by hand.
            print!("This terminal does not report modifier keys on their own; they will not be counted.\r\n");
        }
        let summary = session.run(source).await;
        signals.abort();
        anyhow::Ok(summary)
    });

    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
    terminal::restore_terminal();

    report_summary(&data_file, &summary?);
    Ok(())
}

fn report_load(path: &Path, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded { keys } => println!("Loaded {keys} keys from {}", path.display()),
        LoadOutcome::Missing => println!("No existing data at {}. Starting fresh.", path.display()),
        other => eprintln!("Ignoring {}: {other}. Starting fresh.", path.display()),
    }
}

fn report_summary(path: &Path, summary: &SessionSummary) {
    if let Some(reason) = summary.reason {
        tracing::info!(%reason, "tracking stopped");
    }
    if let Some(intake) = summary.intake {
        tracing::info!(presses = intake.presses, errors = intake.errors, "session intake");
    }
    match &summary.final_flush {
        Ok(r) => println!("Saved {} presses across {} keys to {}", r.total, r.keys, path.display()),
        // Exit normally anyway; hanging on to the process would not save the data.
        Err(e) => eprintln!("Failed to save counts to {}: {e}", path.display()),
    }
}

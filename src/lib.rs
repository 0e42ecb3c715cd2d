// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod host;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, validate_interval, ConfigFile};
use crate::engine::{ControlEvent, PollConfig, PollScheduler, Runtime, RuntimeOptions};
use crate::errors::{LinkSyncError, Result};
use crate::fs::RealFileSystem;
use crate::host::{watch_manifest, ManifestHost, ResourceCatalog};
use crate::watch::resolve_source_path;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - manifest loading and CLI overrides
/// - the manifest host and the poll scheduler
/// - the runtime shell with its timer
/// - stdin user actions, manifest watching and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone();
    let mut cfg = load_and_validate(&config_path)?;

    if let Some(interval) = args.interval {
        validate_interval(interval)?;
        cfg.config.interval = interval;
    }
    if let Some(mode) = args.mode {
        cfg.config.mode = mode;
    }

    let host = ManifestHost::new(&config_path, &cfg);

    if args.dry_run {
        print_dry_run(&cfg, &host);
        return Ok(());
    }

    let poll_config = PollConfig::new(cfg.config.interval, cfg.config.mode);
    let mut scheduler = PollScheduler::new(poll_config, Arc::new(RealFileSystem));

    if args.once {
        let report = scheduler.reload_all(&host);
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "one-shot reload finished"
        );
        if !report.failed.is_empty() {
            return Err(LinkSyncError::Other(anyhow::anyhow!(
                "{} resource(s) failed to reload",
                report.failed.len()
            )));
        }
        return Ok(());
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlEvent>(64);

    // Keep the watcher alive for as long as the runtime runs.
    let _manifest_watcher = match watch_manifest(&config_path, control_tx.clone()) {
        Ok(w) => Some(w),
        Err(err) => {
            warn!(error = %err, "manifest changes will not be picked up automatically");
            None
        }
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = control_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            let _ = tx.send(ControlEvent::ShutdownRequested).await;
        });
    }

    spawn_stdin_commands(control_tx);

    let options = RuntimeOptions {
        autostart: cfg.config.autostart,
    };

    let runtime = Runtime::new(scheduler, host, control_rx, options);
    runtime.run().await
}

/// Forward user actions typed on stdin (one per line) to the runtime.
fn spawn_stdin_commands(tx: mpsc::Sender<ControlEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<ControlEvent>() {
                        Ok(event) => {
                            if tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(msg) => warn!("{msg}"),
                    }
                }
                Ok(None) => {
                    debug!("stdin closed; no more interactive commands");
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "failed to read stdin");
                    break;
                }
            }
        }
    });
}

/// Simple dry-run output: print settings and resolved resources.
fn print_dry_run(cfg: &ConfigFile, host: &ManifestHost) {
    println!("linksync dry-run");
    println!("  config.interval = {}", cfg.config.interval);
    println!("  config.mode = {}", cfg.config.mode);
    println!("  config.autostart = {}", cfg.config.autostart);
    println!();

    let root = host.project_root();
    println!("resources ({}):", cfg.resource.len());
    for (name, res) in cfg.resource.iter() {
        println!("  - {name}");
        match resolve_source_path(&res.path, root.as_deref()) {
            Some(path) => {
                let state = if path.is_file() { "" } else { " (missing)" };
                println!("      path: {}{state}", path.display());
            }
            None => println!("      path: <none>"),
        }
        if let Some(ref cmd) = res.reload {
            println!("      reload: {cmd}");
        }
    }

    debug!("dry-run complete (nothing watched)");
}

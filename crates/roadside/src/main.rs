#![warn(missing_docs)]

//! Entry point for the `roadside` binary.
//!
//! Replays a scripted head-unit session against the engine with console
//! collaborators, printing template operations, outbound bridge commands and
//! map hand-offs as they happen.

mod cli;
mod companion;
mod error;
mod host;
mod script;

use std::{process, sync::Arc};

use clap::Parser;
use roadside_config::Config;
use roadside_engine::{Engine, TemplateHost, handoff_channel, run_handoffs};
use roadside_protocol::ipc::companion_channel;
use tokio::runtime::Runtime;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::Cli,
    error::{Error, Result},
    host::{ConsoleHost, ConsoleOpener, ConsoleScheduler},
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and replay the script.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let env_filter = logging::env_filter_from_spec(&cli.log.spec());
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time())
        .with(logging::forward::layer())
        .try_init()
        .ok();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let events = script::load(&cli.script)?;
    info!(channel = %config.channel_name, events = events.len(), "replaying session");

    let rt = Runtime::new().map_err(Error::Runtime)?;
    rt.block_on(async move {
        let (companion_tx, mut companion_rx) = companion_channel();
        let (handoff_tx, handoff_rx) = handoff_channel();
        let opener = Arc::new(ConsoleOpener {
            primary_installed: !cli.no_maps_app,
            primary_prefix: config.maps.primary.clone(),
        });
        let handoffs = tokio::spawn(run_handoffs(handoff_rx, opener));
        let channel = config.channel_name.clone();
        logging::forward::set_sink(companion_tx.clone());

        let engine = Engine::new(config, companion_tx, handoff_tx, Arc::new(ConsoleScheduler));
        let host: Arc<dyn TemplateHost> = Arc::new(ConsoleHost);
        let result = script::replay(&engine, &host, &events);
        drop(engine);
        // The sink holds a sender; the drain below ends only once it is gone.
        logging::forward::clear_sink();

        while let Some(msg) = companion_rx.recv().await {
            if let Some(line) = companion::describe(&channel, &msg) {
                println!("{line}");
            }
        }
        let dropped = logging::forward::dropped();
        if dropped > 0 {
            info!(dropped, "log events not forwarded");
        }
        // Executor ends once the engine's queue sender is gone.
        if let Err(e) = handoffs.await {
            error!(error = %e, "hand-off executor stopped abnormally");
        }
        result
    })
}

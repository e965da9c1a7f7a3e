//! Command to run the module against the line transport.

use crate::error::CliError;
use crate::transport::{Envelope, LineSink};
use crate::utils::{load_settings, read_json, GlobalOptions};
use clap::Args;
use edge_sqlite::dispatch::{BusMessage, Disposition};
use edge_sqlite::ReconfigurationController;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Messages buffered per worker before the reader blocks.
const QUEUE_DEPTH_PER_WORKER: usize = 16;

/// Run the module, reading envelopes from stdin until EOF.
#[derive(Args)]
pub struct RunCommand {
    /// Desired properties available at startup (JSON file)
    #[arg(long, value_name = "FILE")]
    pub desired: Option<PathBuf>,

    /// Number of worker threads executing commands [default: CPU cores + 1]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,
}

impl RunCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_settings(global)?;
        let desired = self.desired.as_deref().map(read_json).transpose()?;

        let sink = Arc::new(LineSink::new(std::io::stdout()));
        let controller = ReconfigurationController::from_settings(&settings, sink);

        // A failed start leaves the module inert; it keeps listening for pushes
        if let Err(e) = controller.start(desired.as_ref()) {
            log::warn!("Started without an active configuration: {e}");
        }

        let workers = self.workers.map_or_else(default_workers, usize::from);
        serve(
            std::io::stdin().lock(),
            &controller,
            settings.input_name(),
            workers,
        )?;

        log::info!(
            "Input closed after {} message(s); shutting down",
            controller.dispatcher().messages_received()
        );
        Ok(())
    }
}

/// CPU cores plus one, like a connection pool sized for blocking work.
fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get() + 1)
        .unwrap_or(5)
}

/// Read envelopes from `reader` until EOF.
///
/// Configuration pushes are applied inline. Messages on `input_name` are
/// queued to a fixed set of `workers` threads; the reader blocks while the
/// queue is full. Returns once every queued message has been handled.
fn serve<R: BufRead>(
    reader: R,
    controller: &ReconfigurationController,
    input_name: &str,
    workers: usize,
) -> Result<(), CliError> {
    let workers = workers.max(1);
    let (sender, receiver) = mpsc::sync_channel::<BusMessage>(workers * QUEUE_DEPTH_PER_WORKER);
    let receiver = Mutex::new(receiver);

    thread::scope(|scope| -> Result<(), CliError> {
        for _ in 0..workers {
            let receiver = &receiver;
            scope.spawn(move || work(controller, receiver));
        }

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match Envelope::parse(&line) {
                Ok(Envelope::Desired { desired }) => {
                    if let Err(e) = controller.on_configuration_change(&desired) {
                        log::debug!("Configuration push rejected: {e}");
                    }
                }
                Ok(Envelope::Message {
                    input,
                    properties,
                    body,
                }) => {
                    if input != input_name {
                        log::debug!("Ignoring message on unbound input '{input}'");
                        continue;
                    }
                    if sender.send(BusMessage { properties, body }).is_err() {
                        log::error!("All workers stopped; no further messages can be handled");
                        break;
                    }
                }
                Err(e) => log::warn!("Skipping unreadable line: {e}"),
            }
        }

        // Workers drain the queue and exit once the sender is gone
        drop(sender);
        Ok(())
    })
}

fn work(controller: &ReconfigurationController, receiver: &Mutex<Receiver<BusMessage>>) {
    loop {
        let next = receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv();
        let Ok(message) = next else {
            return;
        };
        if let Disposition::Failed(reason) = controller.dispatcher().handle(&message) {
            log::debug!("Command failed: {reason}");
        }
    }
}

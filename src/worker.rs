use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use eframe::egui;
use tracing::{debug, error};

use crate::config::GENERIC_ERROR_MESSAGE;
use crate::state::Ticket;
use crate::submission::{Outcome, Submitter};
use crate::types::{CalculationPayload, ErrorState};

pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

/// Runs each submission on its own thread and hands the outcome back to the
/// UI thread. Nothing is cancelled or de-duplicated.
pub struct Dispatcher {
    submitter: Submitter,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl Dispatcher {
    pub fn new(submitter: Submitter) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { submitter, tx, rx }
    }

    pub fn endpoint(&self) -> &str {
        self.submitter.endpoint()
    }

    pub fn dispatch(
        &self,
        ticket: Ticket,
        payload: CalculationPayload,
        repaint: Option<egui::Context>,
    ) {
        let submitter = self.submitter.clone();
        let tx = self.tx.clone();
        debug!(ticket = ticket.0, ?payload, "dispatching calculation");

        let spawned = thread::Builder::new()
            .name(format!("calculate-{}", ticket.0))
            .spawn(move || {
                let outcome = submitter.submit(&payload);
                // The receiver only goes away with the app.
                let _ = tx.send(Completion { ticket, outcome });
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });

        if let Err(err) = spawned {
            error!(ticket = ticket.0, error = %err, "failed to spawn calculation thread");
            let _ = self.tx.send(Completion {
                ticket,
                outcome: Outcome::Failure(ErrorState {
                    message: GENERIC_ERROR_MESSAGE.to_owned(),
                }),
            });
        }
    }

    /// Completions that have arrived since the last call, in arrival order.
    pub fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }
}

//! Coalesce rapid edits into one evaluation.
//!
//! Every submitted value restarts the window; the evaluation runs once on the
//! last value after the window passes quietly. Results are published through
//! a `watch` channel so readers always see the newest one.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use authpilot_core::models::snapshot::FormSnapshot;
use authpilot_scoring::insights::{Assessment, assess};

use crate::config::SessionConfig;
use crate::error::SessionError;

pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the worker on the current runtime. `evaluate` runs on the worker
    /// task, once per quiet window.
    pub fn spawn<O, F>(window: Duration, evaluate: F) -> (Self, watch::Receiver<Option<O>>)
    where
        O: Send + Sync + 'static,
        F: FnMut(T) -> O + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = watch::channel(None);
        let task = tokio::spawn(run(rx, window, evaluate, out_tx));
        (Self { tx, task }, out_rx)
    }

    /// Queue a value, superseding any value still waiting out its window.
    pub fn submit(&self, value: T) -> Result<(), SessionError> {
        self.tx.send(value).map_err(|_| SessionError::DebouncerClosed)
    }

    /// Stop accepting values. A pending value is still evaluated before the
    /// worker exits.
    pub async fn close(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            debug!(error = %e, "debounce worker ended abnormally");
        }
    }
}

impl Debouncer<FormSnapshot> {
    /// Debounced scoring for a form, using the session's window.
    pub fn assessments(config: &SessionConfig) -> (Self, watch::Receiver<Option<Assessment>>) {
        Self::spawn(config.debounce_window(), |snapshot: FormSnapshot| assess(&snapshot))
    }
}

async fn run<T, O, F>(
    mut rx: mpsc::UnboundedReceiver<T>,
    window: Duration,
    mut evaluate: F,
    out: watch::Sender<Option<O>>,
) where
    F: FnMut(T) -> O,
{
    while let Some(mut latest) = rx.recv().await {
        let mut coalesced = 0u32;
        let closed = loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(value) => {
                        latest = value;
                        coalesced += 1;
                    }
                    None => break true,
                },
                _ = tokio::time::sleep(window) => break false,
            }
        };

        debug!(coalesced, "debounce window elapsed");
        out.send_replace(Some(evaluate(latest)));
        if closed {
            return;
        }
    }
}

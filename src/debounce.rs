//! Input debouncing.
//!
//! [`spawn`] starts a background task that forwards a value only after the
//! input side has been quiet for the configured delay. Each new value
//! replaces the pending one and restarts the timer, so only the latest
//! value is ever emitted.
//!
//! Closing the input side flushes a still-pending value immediately and
//! then closes the output.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

/// Spawn a debouncer task with the given quiet period.
///
/// Returns the input sender and the receiver of debounced values.
/// Must be called from within a tokio runtime.
pub fn spawn<T: Send + 'static>(
    delay: Duration,
) -> (mpsc::UnboundedSender<T>, mpsc::UnboundedReceiver<T>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (output_tx, output_rx) = mpsc::unbounded_channel();
    tokio::spawn(run(delay, input_rx, output_tx));
    (input_tx, output_rx)
}

async fn run<T>(
    delay: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
    output: mpsc::UnboundedSender<T>,
) {
    let mut pending: Option<T> = None;
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            incoming = input.recv() => match incoming {
                Some(value) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                None => {
                    if let Some(value) = pending.take() {
                        let _ = output.send(value);
                    }
                    break;
                }
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    if output.send(value).is_err() {
                        tracing::debug!("debounce output closed, stopping");
                        break;
                    }
                }
            }
        }
    }
}

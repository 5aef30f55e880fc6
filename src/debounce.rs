use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Trailing-edge debounce: raw values go in, and a value comes out once
/// the input has been quiet for `window`. Each new arrival replaces the
/// pending value and restarts the timer; once the timer fires the
/// commit is not cancellable.
pub fn spawn_debounce(window: Duration) -> (mpsc::UnboundedSender<String>, mpsc::UnboundedReceiver<String>) {
    let (raw_tx, mut raw_rx) = mpsc::unbounded_channel::<String>();
    let (committed_tx, committed_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let mut pending: Option<String> = None;
        let mut deadline = Instant::now();

        loop {
            tokio::select! {
                raw = raw_rx.recv() => {
                    match raw {
                        Some(value) => {
                            pending = Some(value);
                            deadline = Instant::now() + window;
                        }
                        // Input side closed; nothing more will commit.
                        None => break,
                    }
                }
                _ = sleep_until(deadline), if pending.is_some() => {
                    if let Some(value) = pending.take() {
                        if committed_tx.send(value).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    (raw_tx, committed_rx)
}

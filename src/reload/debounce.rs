//! Trailing-edge debounce over a channel.

use std::time::Duration;

use tokio::sync::mpsc;

/// Default quiet period.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Group items that arrive less than `wait` apart into batches.
///
/// A batch is sent once `wait` passes without a new item, or when `input`
/// closes. Must be called inside a Tokio runtime.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::UnboundedReceiver<T>,
    wait: Duration,
) -> mpsc::UnboundedReceiver<Vec<T>> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(first) = input.recv().await {
            let mut batch = vec![first];
            let mut closed = false;

            loop {
                match tokio::time::timeout(wait, input.recv()).await {
                    Ok(Some(item)) => batch.push(item),
                    Ok(None) => {
                        closed = true;
                        break;
                    }
                    Err(_) => break,
                }
            }

            if tx.send(batch).is_err() || closed {
                return;
            }
        }
    });

    rx
}

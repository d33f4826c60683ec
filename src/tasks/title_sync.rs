//! Mirrors the timer title into the terminal window title

use std::{io, sync::Arc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{services::set_terminal_title, state::{AppState, TimerView}};

/// Background task that rewrites the terminal title whenever it changes
pub async fn title_sync_task(state: Arc<AppState>) {
    info!("Starting title sync task");
    sync_titles(state.view_tx.subscribe(), set_terminal_title).await;
}

/// Hand every distinct title seen on `view_rx` to `write`, starting with the
/// current one. Returns when the channel closes.
pub async fn sync_titles<F>(mut view_rx: watch::Receiver<TimerView>, mut write: F)
where
    F: FnMut(&str) -> io::Result<()>,
{
    let mut last_title = view_rx.borrow_and_update().title.clone();
    if let Err(e) = write(&last_title) {
        warn!("Failed to set terminal title: {}", e);
    }

    while view_rx.changed().await.is_ok() {
        let title = view_rx.borrow_and_update().title.clone();
        if title == last_title {
            continue;
        }

        debug!("Title changed to {}", title);
        if let Err(e) = write(&title) {
            warn!("Failed to set terminal title: {}", e);
        }
        last_title = title;
    }

    debug!("View channel closed, title sync exiting");
}

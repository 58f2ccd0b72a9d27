use crate::events::EventBus;
use crate::events::feed::pump;
use log::{error, info};
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::BufReader;

/// Streams a newline-delimited push feed (a file or FIFO) onto the bus.
pub async fn read_feed_task(path: PathBuf, bus: EventBus) {
    info!("Reading push events from {}", path.display());

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to open push feed {}: {}", path.display(), e);
            return;
        }
    };

    match pump(BufReader::new(file), &bus).await {
        Ok(count) => info!("Push feed {} closed after {} event(s)", path.display(), count),
        Err(e) => error!("Push feed {} failed: {}", path.display(), e),
    }
}

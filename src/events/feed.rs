use crate::error::ClientError;
use crate::events::{EventBus, PushEvent};
use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub fn parse_event(line: &str) -> Result<PushEvent, ClientError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Reads newline-delimited push events and publishes each one on the bus.
///
/// Blank lines are skipped; lines that are not a known event are logged and
/// skipped. Returns the number of events published once the reader is exhausted.
pub async fn pump<R>(reader: R, bus: &EventBus) -> Result<usize, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut published = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_event(&line) {
            Ok(event) => {
                debug!("Push event: {}", event.topic().as_str());
                bus.publish(event);
                published += 1;
            }
            Err(e) => warn!("Skipping malformed push event {:?}: {}", line, e),
        }
    }

    Ok(published)
}

use log::{debug, info};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

/// Fallback for missed push events: asks the controller to reload on a fixed
/// interval. Stops once the controller side of the channel is gone.
pub async fn refresh_task(every: Duration, ticks: mpsc::Sender<()>) {
    if every.is_zero() {
        info!("Periodic refresh disabled");
        return;
    }

    info!("Refreshing every {:?}", every);
    let mut interval = interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the controller already loaded on startup
    interval.tick().await;

    loop {
        interval.tick().await;
        debug!("Periodic refresh");
        if ticks.send(()).await.is_err() {
            debug!("Controller gone, stopping refresher");
            break;
        }
    }
}

mod api;
mod commands;
mod config;
mod error;
mod events;
mod handlers;
mod models;
mod render;
mod state;
mod tasks;
mod voting;

use api::{HttpApi, VotingApi};
use config::Config;
use error::ClientError;
use events::EventBus;
use handlers::Controller;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const EVENT_CAPACITY: usize = 64;

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ClientError> {
    let config = Config::from_env()?;
    info!("Starting {:?} console against {}", config.role, config.base_url);

    let api: Arc<dyn VotingApi> = Arc::new(HttpApi::new(&config)?);
    let mut controller = Controller::new(api, config.role);

    let bus = EventBus::new(EVENT_CAPACITY);
    let mut events = bus.subscribe(&controller.topics());
    info!("Listening for {} push event type(s)", events.topics().len());

    // --- Background tasks ---
    match config.feed.clone() {
        Some(path) => {
            let feed_bus = bus.clone();
            tokio::spawn(async move {
                tasks::feed_reader::read_feed_task(path, feed_bus).await;
            });
        }
        None => info!("No push feed configured, relying on periodic refresh"),
    }
    // Only the feed reader publishes; the subscription ends when it does
    drop(bus);

    let (tick_sender, mut ticks) = mpsc::channel(1);
    tokio::spawn(tasks::refresher::refresh_task(config.refresh_interval, tick_sender));

    // Initial page load
    let loaded = controller.reload().await.map(|_| vec![controller.render()]);
    report(loaded);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events_open = true;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed, exiting");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let result = match commands::parse(controller.role(), &line) {
                    Ok(command) => controller.execute(command).await,
                    Err(e) => Err(e),
                };
                report(result);
            }
            event = events.recv(), if events_open => {
                match event {
                    Some(event) => report(controller.handle_event(&event).await),
                    None => {
                        debug!("Push feed finished");
                        events_open = false;
                    }
                }
            }
            Some(()) = ticks.recv() => {
                let refreshed = controller.reload().await.map(|_| vec![controller.render()]);
                report(refreshed);
            }
        }
    }

    Ok(())
}

fn report(result: Result<Vec<String>, ClientError>) {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(ClientError::UnknownCommand(input)) => {
            println!("Unknown command: {} (type 'help')", input);
        }
        Err(e) => {
            warn!("{}", e);
            println!("Error: {}", e);
        }
    }
}

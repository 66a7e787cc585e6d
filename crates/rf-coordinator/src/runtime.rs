//! Coordinator event loop
//!
//! A single cooperative task: navigation events and popup messages arrive
//! on a channel, a one-second interval drives the periodic pause check,
//! and a watch flag tears the loop down, cancelling the periodic task
//! with it so nothing leaks past shutdown.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;

use crate::coordinator::Coordinator;
use crate::messages::{Request, Response};
use crate::store::SettingsStore;
use crate::tabs::TabHost;

/// Events fed into the loop by the host.
#[derive(Debug)]
pub enum Command {
    /// A page finished loading in a tab.
    Navigation { tab_id: i32, url: String },
    /// A popup request; the response goes back on the oneshot.
    Message { request: Request, reply: oneshot::Sender<Response> },
}

/// Current wall-clock time in ms since the epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Today's date in the local timezone (the usage record's day key).
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Run the coordinator until the command channel closes or `shutdown`
/// flips to true.
pub async fn run<S, T>(
    coordinator: Coordinator<S, T>,
    mut commands: mpsc::Receiver<Command>,
    mut shutdown: watch::Receiver<bool>,
) where
    S: SettingsStore,
    T: TabHost,
{
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                coordinator.tick(now_ms());
            }
            command = commands.recv() => match command {
                Some(Command::Navigation { tab_id, url }) => {
                    coordinator.on_navigation(tab_id, &url, now_ms(), today());
                }
                Some(Command::Message { request, reply }) => {
                    let response = coordinator.handle_request(request, now_ms());
                    // A dropped popup is not an error.
                    let _ = reply.send(response);
                }
                None => break,
            },
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    log::debug!("coordinator shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rf_core::Settings;

    use crate::store::MemoryStore;
    use crate::tabs::NoopTabHost;

    #[tokio::test]
    async fn test_message_round_trip_and_shutdown() {
        let coordinator = Coordinator::new(MemoryStore::new(), NoopTabHost);
        let (commands_tx, commands_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run(coordinator, commands_rx, shutdown_rx));

        let (reply_tx, reply_rx) = oneshot::channel();
        commands_tx
            .send(Command::Message { request: Request::GetSettings, reply: reply_tx })
            .await
            .unwrap();
        let response = reply_rx.await.unwrap();
        assert_eq!(response, Response::Settings(Settings::default()));

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_loop_ends_when_channel_closes() {
        let coordinator = Coordinator::new(MemoryStore::new(), NoopTabHost);
        let (commands_tx, commands_rx) = mpsc::channel::<Command>(1);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run(coordinator, commands_rx, shutdown_rx));
        drop(commands_tx);
        task.await.unwrap();
    }
}

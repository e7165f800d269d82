use tokio::sync::mpsc;
use tracing::debug;

use console_core::client::DaemonClient;
use console_core::events::{Command, NetEvent};

/// Executes controller commands against the daemon, one spawned task per
/// HTTP call, and reports each outcome back over the event channel. The UI
/// loop never waits on the network.
pub struct Dispatcher {
    client: DaemonClient,
    tx: mpsc::Sender<NetEvent>,
}

impl Dispatcher {
    pub fn new(client: DaemonClient, tx: mpsc::Sender<NetEvent>) -> Self {
        Self { client, tx }
    }

    pub fn dispatch_all(&self, commands: Vec<Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    pub fn dispatch(&self, command: Command) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match command {
                Command::FetchListing { side, seq, path } => {
                    let result = client.list_dir(&path).await;
                    NetEvent::Listing {
                        side,
                        seq,
                        path,
                        result,
                    }
                }
                Command::PersistDir { side, path } => {
                    let result = client.set_dir(side, &path).await;
                    NetEvent::DirPersisted { side, path, result }
                }
                Command::StartSync => NetEvent::SyncFinished(client.start_sync().await),
                Command::FetchLogs => NetEvent::Logs(client.fetch_logs().await),
                Command::FetchConflicts => NetEvent::Conflicts(client.fetch_conflicts().await),
                Command::PollStatus => NetEvent::Status(client.fetch_status().await),
            };
            if tx.send(event).await.is_err() {
                debug!("event channel closed, dropping result");
            }
        });
    }
}

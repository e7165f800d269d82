use crate::error::ClientError;
use crate::protocol::{Conflict, DaemonStatus, DirEntry, Side, SyncResponse};

/// Outbound work requested by the controllers.
///
/// The runtime executes each command as one HTTP call against the daemon and
/// reports the outcome back as a [`NetEvent`]. Keeping the controllers free
/// of IO makes every contract in them unit-testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the listing for `path`. `seq` is the per-side stale guard.
    FetchListing { side: Side, seq: u64, path: String },
    /// Persist a directory selection on the daemon. Fire-and-forget.
    PersistDir { side: Side, path: String },
    StartSync,
    FetchLogs,
    FetchConflicts,
    PollStatus,
}

/// Results coming back from the network tasks.
#[derive(Debug)]
pub enum NetEvent {
    Listing {
        side: Side,
        seq: u64,
        path: String,
        result: Result<Vec<DirEntry>, ClientError>,
    },
    DirPersisted {
        side: Side,
        path: String,
        result: Result<(), ClientError>,
    },
    SyncFinished(Result<SyncResponse, ClientError>),
    Logs(Result<String, ClientError>),
    Conflicts(Result<Vec<Conflict>, ClientError>),
    Status(Result<DaemonStatus, ClientError>),
}

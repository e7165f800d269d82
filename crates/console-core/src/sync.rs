//! Sync trigger and status tracking.

use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::events::Command;
use crate::protocol::{DaemonStatus, SyncResponse};

// User-facing strings, kept exactly as the original UI shows them.
pub const MSG_SYNCING: &str = "同步中...";
pub const MSG_SYNC_DONE: &str = "同步完成";
pub const MSG_NO_CONFLICTS: &str = "无冲突";
pub const CONFLICT_PREFIX: &str = "冲突文件: ";
pub const MSG_SYNC_FAILED_PREFIX: &str = "同步失败: ";

/// Sync lifecycle. Terminal states return to `Syncing` on the next trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Syncing,
    Completed,
    Failed,
}

/// Drives the `/sync` trigger and resolves its outcome.
///
/// The daemon acknowledges `POST /sync` immediately (`started`) and keeps
/// working in the background, so while the phase is `Syncing` the runtime
/// polls `GET /status` until it reports `done` or `error: ...`. Whatever the
/// outcome, logs and conflicts are refreshed afterwards.
#[derive(Debug)]
pub struct SyncController {
    phase: SyncPhase,
    message: String,
}

impl SyncController {
    pub fn new() -> Self {
        Self {
            phase: SyncPhase::Idle,
            message: String::new(),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Text for the status line.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_syncing(&self) -> bool {
        self.phase == SyncPhase::Syncing
    }

    /// Trigger a sync. Rejected while one is already in flight so two
    /// overlapping `/sync` POSTs can never be issued.
    pub fn start(&mut self) -> Vec<Command> {
        if self.is_syncing() {
            warn!("sync already in flight, ignoring trigger");
            return Vec::new();
        }
        info!("starting sync");
        self.phase = SyncPhase::Syncing;
        self.message = MSG_SYNCING.to_string();
        vec![Command::StartSync]
    }

    /// Apply the `/sync` response. Emits the logs+conflicts refresh in every
    /// outcome, success or not.
    pub fn on_sync_response(
        &mut self,
        result: Result<SyncResponse, ClientError>,
    ) -> Vec<Command> {
        match result {
            Ok(resp) => {
                let msg = resp
                    .status
                    .unwrap_or_else(|| MSG_SYNC_DONE.to_string());
                if in_flight(&msg) {
                    // Background sync acknowledged; the status poll resolves it.
                    self.message = msg;
                } else {
                    self.phase = SyncPhase::Completed;
                    self.message = msg;
                }
            }
            Err(e) => {
                warn!("sync request failed: {}", e);
                self.phase = SyncPhase::Failed;
                self.message = format!("{MSG_SYNC_FAILED_PREFIX}{e}");
            }
        }
        vec![Command::FetchLogs, Command::FetchConflicts]
    }

    /// Whether the runtime should keep polling `GET /status`.
    pub fn wants_status_poll(&self) -> bool {
        self.is_syncing()
    }

    /// Apply a `/status` poll. The poll is advisory: failures are ignored and
    /// nothing changes unless a running sync just resolved.
    pub fn on_status_poll(
        &mut self,
        result: Result<DaemonStatus, ClientError>,
    ) -> Vec<Command> {
        let status = match result {
            Ok(s) => s.status,
            Err(e) => {
                debug!("status poll failed: {}", e);
                return Vec::new();
            }
        };

        if !self.is_syncing() {
            return Vec::new();
        }

        if status == "done" {
            self.phase = SyncPhase::Completed;
            self.message = MSG_SYNC_DONE.to_string();
            vec![Command::FetchLogs, Command::FetchConflicts]
        } else if status.starts_with("error") {
            self.phase = SyncPhase::Failed;
            self.message = format!("{MSG_SYNC_FAILED_PREFIX}{status}");
            vec![Command::FetchLogs, Command::FetchConflicts]
        } else {
            // "running" (or a daemon restarted back to "idle"): keep waiting.
            Vec::new()
        }
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}

/// Acknowledgement strings the daemon uses while the run is still going.
fn in_flight(msg: &str) -> bool {
    matches!(msg, "started" | "running" | "already running")
}

//! Directory browsing controller for one side of the sync.

use tracing::{debug, warn};

use crate::error::ClientError;
use crate::events::Command;
use crate::paths;
use crate::protocol::{DirEntry, Side};

/// Browsing state for one side: the path cursor, the entries currently on
/// screen, and the stale-response guard.
///
/// Selecting a directory moves the cursor, persists the selection on the
/// daemon and re-lists — the same protocol for descending, parent navigation
/// and explicit jumps. A listing that comes back for an older request is
/// dropped, so a slow response can never overwrite a newer navigation.
#[derive(Debug)]
pub struct DirBrowser {
    side: Side,
    cursor: String,
    entries: Vec<DirEntry>,
    latest_seq: u64,
    loading: bool,
    error: Option<String>,
}

impl DirBrowser {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            cursor: "/".to_string(),
            entries: Vec::new(),
            latest_seq: 0,
            loading: false,
            error: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Listing or persist error for this side, cleared by the next
    /// successful listing.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Initial listing of the current cursor, issued once at startup.
    /// No persist: the daemon already starts at the root.
    pub fn open(&mut self) -> Vec<Command> {
        vec![self.fetch(self.cursor.clone())]
    }

    /// Select `entry` out of the current listing. Directories navigate into
    /// the child path; files are inert.
    pub fn select_entry(&mut self, entry: &DirEntry) -> Vec<Command> {
        if !entry.is_dir {
            return Vec::new();
        }
        let child = paths::join_child(&self.cursor, &entry.name);
        self.select_dir(child)
    }

    /// Move the cursor to `path`: persist the selection (fire-and-forget)
    /// and re-list. Exactly one POST and one listing fetch per selection.
    pub fn select_dir(&mut self, path: String) -> Vec<Command> {
        debug!("select {:?} dir: {}", self.side, path);
        self.cursor = path.clone();
        vec![
            Command::PersistDir {
                side: self.side,
                path: path.clone(),
            },
            self.fetch(path),
        ]
    }

    /// Navigate to the parent directory. No-op at the root.
    pub fn select_parent(&mut self) -> Vec<Command> {
        let parent = paths::parent_of(&self.cursor);
        if parent == self.cursor {
            return Vec::new();
        }
        self.select_dir(parent)
    }

    /// Re-issue the listing for the current cursor without touching it.
    pub fn refresh(&mut self) -> Vec<Command> {
        vec![self.fetch(self.cursor.clone())]
    }

    fn fetch(&mut self, path: String) -> Command {
        self.latest_seq += 1;
        self.loading = true;
        Command::FetchListing {
            side: self.side,
            seq: self.latest_seq,
            path,
        }
    }

    /// Apply a listing result. Returns `true` when the entries were replaced.
    ///
    /// Results for anything but the latest issued sequence are stale and
    /// dropped. A failed listing keeps the entries currently on screen and
    /// only records the error.
    pub fn apply_listing(
        &mut self,
        seq: u64,
        result: Result<Vec<DirEntry>, ClientError>,
    ) -> bool {
        if seq != self.latest_seq {
            debug!(
                "dropping stale {:?} listing (seq {} < {})",
                self.side, seq, self.latest_seq
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
                true
            }
            Err(e) => {
                warn!("{:?} listing failed: {}", self.side, e);
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Record a failed selection persist. The response body is ignored on
    /// success, but a failure is still surfaced.
    pub fn note_persist_error(&mut self, err: &ClientError) {
        warn!("{:?} set_dir failed: {}", self.side, err);
        self.error = Some(err.to_string());
    }
}

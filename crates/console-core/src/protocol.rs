use serde::{Deserialize, Serialize};

// --- Endpoint paths ---

pub const LIST_DIR: &str = "/list_dir";
pub const SET_SRC_DIR: &str = "/set_src_dir";
pub const SET_DST_DIR: &str = "/set_dst_dir";
pub const SYNC: &str = "/sync";
pub const LOGS: &str = "/logs";
pub const CONFLICTS: &str = "/conflicts";
pub const STATUS: &str = "/status";

/// Which side of the sync a directory cursor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Dest,
}

impl Side {
    /// Endpoint that persists this side's directory selection.
    pub fn set_dir_endpoint(self) -> &'static str {
        match self {
            Side::Source => SET_SRC_DIR,
            Side::Dest => SET_DST_DIR,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Source => Side::Dest,
            Side::Dest => Side::Source,
        }
    }
}

/// One entry of a `/list_dir` response. The daemon's ordering is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Body of the `set_src_dir` / `set_dst_dir` POSTs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDirRequest {
    pub path: String,
}

/// Response of `POST /sync`. The daemon may omit the status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One file in disagreement between source and destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub path: String,
}

/// Response of `GET /status`. Observed values: `idle`, `running`, `done`,
/// `error: <msg>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonStatus {
    pub status: String,
}

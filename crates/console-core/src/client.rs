//! Typed HTTP client for the sync daemon's API.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::protocol::{
    self, Conflict, DaemonStatus, DirEntry, SetDirRequest, Side, SyncResponse,
};

#[derive(Debug, Clone)]
pub struct DaemonClient {
    http: Client,
    base_url: String,
}

impl DaemonClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// List one directory level. The daemon's ordering is returned untouched.
    pub async fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>> {
        debug!("list_dir: {}", path);
        let resp = self
            .http
            .get(self.url(protocol::LIST_DIR))
            .query(&[("path", path)])
            .send()
            .await?;
        parse_json(resp).await
    }

    /// Persist a directory selection on the daemon. The response body is
    /// ignored; only the status matters.
    pub async fn set_dir(&self, side: Side, path: &str) -> Result<()> {
        debug!("set_dir: {:?} -> {}", side, path);
        let resp = self
            .http
            .post(self.url(side.set_dir_endpoint()))
            .json(&SetDirRequest {
                path: path.to_string(),
            })
            .send()
            .await?;
        check_status(&resp)?;
        Ok(())
    }

    /// Trigger a synchronization run.
    pub async fn start_sync(&self) -> Result<SyncResponse> {
        let resp = self.http.post(self.url(protocol::SYNC)).send().await?;
        parse_json(resp).await
    }

    /// Fetch the daemon's log buffer as plain text, displayed verbatim.
    pub async fn fetch_logs(&self) -> Result<String> {
        let resp = self.http.get(self.url(protocol::LOGS)).send().await?;
        check_status(&resp)?;
        Ok(resp.text().await?)
    }

    pub async fn fetch_conflicts(&self) -> Result<Vec<Conflict>> {
        let resp = self.http.get(self.url(protocol::CONFLICTS)).send().await?;
        parse_json(resp).await
    }

    pub async fn fetch_status(&self) -> Result<DaemonStatus> {
        let resp = self.http.get(self.url(protocol::STATUS)).send().await?;
        parse_json(resp).await
    }
}

fn check_status(resp: &Response) -> Result<()> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status(status.as_u16()));
    }
    Ok(())
}

/// Read the body as text first so a malformed payload surfaces as a JSON
/// error rather than a transport error.
async fn parse_json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
    check_status(&resp)?;
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

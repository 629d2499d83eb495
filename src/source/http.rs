//! HTTP backend.
//!
//! Speaks the JSON contract of the firewall backend. Any transport error,
//! non-2xx status or malformed body is reported as an error; nothing is
//! retried and no timeout is imposed beyond the transport's own.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::Backend;
use crate::data::{
    DashboardStats, EventKind, LogEntry, SimulateRequest, SimulateResponse, ThreatAlert,
    TrafficPoint,
};
use crate::error::ConsoleError;

/// Backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    description: String,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str) -> Result<Self, ConsoleError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a backend using an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            description: format!("http: {}", base_url),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConsoleError> {
        let response = self.client.get(self.url(path)).send().await?;

        if !response.status().is_success() {
            return Err(ConsoleError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn traffic(&self) -> Result<Vec<TrafficPoint>, ConsoleError> {
        self.get_json("/api/traffic").await
    }

    async fn logs(&self) -> Result<Vec<LogEntry>, ConsoleError> {
        self.get_json("/api/logs").await
    }

    async fn threats(&self) -> Result<Vec<ThreatAlert>, ConsoleError> {
        self.get_json("/api/threats").await
    }

    async fn stats(&self) -> Result<DashboardStats, ConsoleError> {
        self.get_json("/api/stats").await
    }

    async fn simulate(&self, ip: &str, event: &EventKind) -> Result<(), ConsoleError> {
        let request = SimulateRequest {
            ip_address: ip,
            event: event.as_str(),
        };
        let response = self.client.post(self.url("/simulate")).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(ConsoleError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let reply: SimulateResponse = serde_json::from_slice(&body)?;
        if reply.is_accepted() {
            Ok(())
        } else {
            Err(ConsoleError::Rejected(reply.status.unwrap_or_else(|| "none".to_string())))
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

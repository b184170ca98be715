//! The single best-effort read of the remote employee collection.

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::{employee::Employee, view::EmployeeTable};

pub const DEFAULT_EMPLOYEES_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// Any failed attempt to retrieve the employee collection.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to fetch data, status: {0}")]
    Status(StatusCode),
    #[error("malformed employee payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Fetches the employee collection from a fixed URL. No retries, no timeout.
#[derive(Clone, Debug)]
pub struct Loader {
    client: Client,
    url: Url,
}

impl Loader {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn from_url(url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client, url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue one GET and decode the body as a JSON array of employees.
    #[instrument(name = "loader.fetch", skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Vec<Employee>, LoadFailure> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(LoadFailure::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadFailure::Status(status));
        }
        let body = response.bytes().await.map_err(LoadFailure::Transport)?;
        serde_json::from_slice(&body).map_err(LoadFailure::Decode)
    }
}

/// Run the load and settle `view` with its outcome. Failures are logged and
/// leave the table empty; the loading flag is cleared either way.
pub async fn load_into(loader: &Loader, view: &RwLock<EmployeeTable>) {
    let result = loader.fetch().await;
    match &result {
        Ok(records) => info!(count = records.len(), "employee collection loaded"),
        Err(err) => error!(error = %err, url = %loader.url(), "error fetching employee data"),
    }
    view.write().await.settle(result);
}

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::catalog::RejectedEntity;
use crate::fetch::{self, FetchError};
use crate::view::{CatalogView, ViewState};

#[derive(Clone, Debug)]
pub struct Options {
    pub endpoint: String,
    /// `None` keeps the request unbounded.
    pub timeout_seconds: Option<u64>,
    pub initial_state: ViewState,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: fetch::CATALOG_ENDPOINT.to_string(),
            timeout_seconds: None,
            initial_state: ViewState::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("invalid timeout {value}, expected a positive number of seconds")]
    InvalidTimeout { value: u64 },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Clone, Debug)]
pub struct LoadResult {
    pub started_at: Instant,
    pub elapsed: Duration,
    pub view: CatalogView,
    pub rejected: Vec<RejectedEntity>,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        match reqwest::Url::parse(&options.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(RunnerError::InvalidEndpoint {
                    url: options.endpoint.clone(),
                })
            }
        }
        if options.timeout_seconds == Some(0) {
            return Err(RunnerError::InvalidTimeout { value: 0 });
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Fetches the catalog once and wraps it in a view seeded with
    /// `initial_state`. The initial page is clamped to the filtered result.
    pub async fn run(&self) -> Result<LoadResult, RunnerError> {
        let started_at = Instant::now();
        let client = fetch::build_client(self.options.timeout_seconds)?;
        let decoded = fetch::fetch_catalog(&client, &self.options.endpoint).await?;

        let requested_page = self.options.initial_state.current_page;
        let mut view =
            CatalogView::with_state(decoded.catalog, self.options.initial_state.clone());
        view.go_to_page(requested_page);

        Ok(LoadResult {
            started_at,
            elapsed: started_at.elapsed(),
            view,
            rejected: decoded.rejected,
        })
    }
}

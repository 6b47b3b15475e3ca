use std::time::Duration;

use thiserror::Error;

use crate::catalog::{self, DecodedCatalog};

pub const CATALOG_ENDPOINT: &str = "https://pokebuildapi.fr/api/v1/pokemon";

const USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Erreur lors de la récupération des Pokémons")]
    Status { status: u16 },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("catalog body is not a JSON array: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

/// Builds the client used for the catalog request. `None` means no timeout.
pub fn build_client(timeout_seconds: Option<u64>) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );
    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|source| FetchError::ClientBuild { source })
}

/// Fetches and validates the catalog. Malformed elements are dropped and
/// listed in `DecodedCatalog::rejected`.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    endpoint: &str,
) -> Result<DecodedCatalog, FetchError> {
    tracing::info!(endpoint, "fetching catalog");
    let resp = client
        .get(endpoint)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: endpoint.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "catalog request rejected");
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await.map_err(|source| FetchError::Request {
        url: endpoint.to_string(),
        source,
    })?;
    let values: Vec<serde_json::Value> =
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { source })?;

    let decoded = catalog::decode_entities(values);
    tracing::info!(
        entities = decoded.catalog.len(),
        rejected = decoded.rejected.len(),
        "catalog fetched"
    );
    Ok(decoded)
}

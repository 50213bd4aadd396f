use futures::future::BoxFuture;
use isahc::{config::Configurable, AsyncReadResponseExt, HttpClient};
use thiserror::Error;
use tracing::debug;

use std::time::Duration;

pub const OMDB_BASE_URI: &str = "https://www.omdbapi.com/";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build http client")]
    Build(#[source] isahc::Error),
    #[error("failed to execute get")]
    Get(#[source] isahc::Error),
    #[error("failed to read get response")]
    Read(#[source] std::io::Error),
    #[error("provider returned http status {0}")]
    Status(u16),
}

/// A single GET against the metadata provider. `query` is an already encoded
/// query string without the leading `?`; the returned value is the body text.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, query: String) -> BoxFuture<'_, Result<String, TransportError>>;
}

pub struct IsahcTransport {
    client: HttpClient,
    base_uri: String,
}

impl IsahcTransport {
    pub fn new(timeout: Duration) -> Result<IsahcTransport, TransportError> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Build)?;

        Ok(IsahcTransport {
            client,
            base_uri: OMDB_BASE_URI.to_string(),
        })
    }
}

impl Transport for IsahcTransport {
    fn get(&self, query: String) -> BoxFuture<'_, Result<String, TransportError>> {
        Box::pin(async move {
            use TransportError::*;

            let url = format!("{}?{}", self.base_uri, query);
            debug!("Sending request to {}", mask_api_key(&url));

            let mut response = self.client.get_async(url).await.map_err(Get)?;
            let status = response.status();
            if !status.is_success() {
                return Err(Status(status.as_u16()));
            }

            let body = response.text().await.map_err(Read)?;
            debug!("Returned content {}", body);
            Ok(body)
        })
    }
}

fn mask_api_key(url: &str) -> String {
    match url.find("apikey=") {
        Some(pos) => {
            let value_start = pos + "apikey=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}xxxxx{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}

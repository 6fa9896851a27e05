use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use smartroute_core::ProviderError;

/// One client for every provider; each call is a single attempt bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")
}

pub(crate) async fn fetch_json(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|error| ProviderError::Transport {
            provider,
            detail: error.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|error| ProviderError::Malformed {
            provider,
            detail: error.to_string(),
        })
}

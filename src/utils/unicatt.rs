use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{default_on_request_failure, Jitter, RetryTransientMiddleware, Retryable, RetryableStrategy};

use crate::models::RawScheduleResponse;
use crate::utils::settings::{RetryPolicy, Settings};

// Retries only on the configured status codes, plus the usual connection failures and timeouts.
struct StatusRetry {
    statuses: Vec<u16>,
}

impl RetryableStrategy for StatusRetry {
    fn handle(&self, res: &Result<reqwest::Response, reqwest_middleware::Error>) -> Option<Retryable> {
        match res {
            Ok(response) if self.statuses.contains(&response.status().as_u16()) => Some(Retryable::Transient),
            Ok(_) => None,
            Err(error) => default_on_request_failure(error),
        }
    }
}

pub fn build_client(policy: &RetryPolicy) -> Result<ClientWithMiddleware> {
    let client = Client::builder()
        .timeout(policy.timeout)
        .build()
        .context("Failed to build the client")?;

    let backoff = ExponentialBackoff::builder()
        .retry_bounds(policy.backoff_factor, policy.max_backoff)
        .jitter(Jitter::None)
        .base(2)
        .build_with_max_retries(policy.max_retries);

    let strategy = StatusRetry {
        statuses: policy.retry_statuses.clone(),
    };

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy_and_strategy(backoff, strategy))
        .build())
}

// Posts the request descriptor and parses the schedule out of the response body.
pub async fn retrieve_schedule(settings: &Settings) -> Result<RawScheduleResponse> {
    let client = build_client(&settings.retry)?;
    let body = serde_json::to_string(&settings.request).context("Failed to encode the request body")?;

    debug!("Posting {} to {}", body, settings.url);
    let response = client
        .post(settings.url.clone())
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .context("Failed to send schedule request")?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Schedule request failed with status {}", status));
    }

    let text = response.text().await.context("Failed to read response text")?;
    info!("Schedule response received ({} bytes)", text.len());

    serde_json::from_str(&text).context("Failed to parse the schedule response")
}

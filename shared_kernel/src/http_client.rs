use anyhow::Context;
use lazy_static::lazy_static;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use url::Url;

lazy_static! {
    static ref CLIENT: ClientWithMiddleware = {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        ClientBuilder::new(reqwest::Client::new())
            // Retry failed requests.
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .with(TracingMiddleware::default())
            .build()
    };
}

/// Status and raw body of a response, for callers that report upstream
/// failures instead of deserializing them.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

pub struct HttpClient;

impl HttpClient {
    pub async fn post_json<Body: Serialize + ?Sized>(
        url: Url,
        body: &Body,
    ) -> anyhow::Result<RawResponse> {
        let payload = serde_json::to_vec(body).context("Failed to serialize request body")?;
        let response = CLIENT
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to get text response")?;

        Ok(RawResponse { status, body })
    }
}

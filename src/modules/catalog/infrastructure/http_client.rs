//! Rate-limited HTTP client shared by the catalog providers.
//!
//! Every provider funnels through one of these: client-side rate limiting,
//! bounded retries with exponential backoff and jitter for 429s, server
//! errors and transport failures.

use crate::shared::errors::{AppError, AppResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use rand::Rng;
use reqwest::{Client, RequestBuilder};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

const USER_AGENT: &str = "frikidex/0.1";

pub struct ApiClient {
    client: Client,
    limiter: DefaultDirectRateLimiter,
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    provider_name: String,
}

impl ApiClient {
    /// `requests_per_second` may be fractional; burst is at least 1.
    pub fn new(provider_name: &str, requests_per_second: f64, burst: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / requests_per_second.max(0.01));
        let quota = Quota::with_period(period)
            .unwrap()
            .allow_burst(NonZeroU32::new(burst.max(1)).unwrap());

        Self {
            client: Client::new(),
            limiter: RateLimiter::direct(quota),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            provider_name: provider_name.to_string(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn get_json<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute(|| self.client.get(url)).await
    }

    /// POST with an empty body; parameters ride in the query string
    pub async fn post_empty<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute(|| self.client.post(url)).await
    }

    /// POST a raw text body with extra headers (the IGDB query language)
    pub async fn post_text<T>(
        &self,
        url: &str,
        body: &str,
        headers: &[(&str, String)],
    ) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute(|| {
            let mut request = self.client.post(url).body(body.to_string());
            for (name, value) in headers {
                request = request.header(*name, value);
            }
            request
        })
        .await
    }

    async fn execute<T>(&self, build: impl Fn() -> RequestBuilder) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        for attempt in 0..=self.max_retries {
            self.limiter.until_ready().await;

            let request = build().header("User-Agent", USER_AGENT);
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let retryable = status.as_u16() == 429 || status.is_server_error();

                    if retryable && attempt < self.max_retries {
                        let delay = self.backoff_delay(attempt);
                        log::warn!(
                            "{} API returned {} (attempt {}/{}). Retrying in {:?}",
                            self.provider_name,
                            status,
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    }
                    if !status.is_success() {
                        return Err(AppError::ApiError(format!(
                            "{} API returned error: {}",
                            self.provider_name, status
                        )));
                    }

                    return self.parse_response(response).await;
                }
                Err(err) => {
                    let transient = err.is_timeout() || err.is_connect();
                    if transient && attempt < self.max_retries {
                        let delay = self.backoff_delay(attempt);
                        log::warn!(
                            "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.provider_name,
                            attempt + 1,
                            self.max_retries + 1,
                            err,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(AppError::ApiError(format!(
                        "{} API request failed: {}",
                        self.provider_name, err
                    )));
                }
            }
        }

        Err(AppError::ApiError(format!(
            "{} API request failed after {} attempts",
            self.provider_name,
            self.max_retries + 1
        )))
    }

    /// Exponential backoff with up to 250ms of jitter
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
        (exponential + jitter).min(self.max_delay)
    }

    async fn parse_response<T>(&self, response: reqwest::Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name,
                e,
                if text.len() > 200 {
                    format!("{}...", &text[..200])
                } else {
                    text
                }
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_is_capped() {
        let client = ApiClient::new("Test", 10.0, 3);
        let first = client.backoff_delay(0);
        assert!(first >= Duration::from_millis(500));
        assert!(client.backoff_delay(10) <= Duration::from_secs(30));
    }

    #[test]
    fn test_client_carries_provider_name() {
        let client = ApiClient::new("PokeAPI", 5.0, 2);
        assert_eq!(client.provider_name(), "PokeAPI");
    }
}

use std::time::Duration;

use log::debug;
use reqwest::header::ACCEPT;
use reqwest::Client;
use thiserror::Error;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Client identity sent to subscription providers
pub const DEFAULT_USER_AGENT: &str = "ClashForWindows/0.20.39";

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Failed to send request: {0}")]
    Request(reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),

    #[error("Failed to create tokio runtime: {0}")]
    Runtime(std::io::Error),
}

/// Request parameters for fetching a subscription
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

/// Makes an HTTP GET request to the specified URL
///
/// # Arguments
/// * `url` - The URL to request
/// * `options` - User agent and timeout of the request
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(HttpError)` - If the request failed or the status is not a success
pub async fn web_get_async(url: &str, options: &FetchOptions) -> Result<String, HttpError> {
    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()
        .map_err(HttpError::Client)?;

    let response = client
        .get(url)
        .header(ACCEPT, "*/*")
        .send()
        .await
        .map_err(HttpError::Request)?;

    let status = response.status();
    debug!("GET {} -> {}", url, status);
    if !status.is_success() {
        return Err(HttpError::Status(status));
    }

    response.text().await.map_err(HttpError::Body)
}

/// Synchronous version of web_get_async that uses tokio runtime to run the async function
pub fn web_get(url: &str, options: &FetchOptions) -> Result<String, HttpError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(HttpError::Runtime)?;

    rt.block_on(web_get_async(url, options))
}

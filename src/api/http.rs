//! Shared HTTP plumbing: client construction, bearer requests and
//! error normalization.

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::core::constants::http_status;
use crate::core::error::{GscoutError, Result};

/// Build the reqwest client every remote call goes through.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout_duration())
        .user_agent(config.user_agent())
        .build()?;
    Ok(client)
}

/// Parse a configured base URL.
pub fn parse_base(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| GscoutError::Config(format!("{name} '{value}' is not a valid URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(GscoutError::Config(format!(
            "{name} '{value}' cannot be used as a base URL"
        )));
    }
    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Send a bodiless `request` with the bearer token and a JSON content type,
/// then decode the response as `T`.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder, token: &str) -> Result<T> {
    send(request.header(CONTENT_TYPE, "application/json"), token).await
}

/// Send `body` as JSON with the bearer token, then decode the response as `T`.
/// `RequestBuilder::json` sets the content type.
pub async fn post_json<T, B>(request: RequestBuilder, token: &str, body: &B) -> Result<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    send(request.json(body), token).await
}

/// Non-2xx responses become [`GscoutError::Auth`] or [`GscoutError::Api`].
async fn send<T: DeserializeOwned>(request: RequestBuilder, token: &str) -> Result<T> {
    let response = request.bearer_auth(token).send().await?;

    let status = response.status();
    let body = response.text().await?;
    debug!("<- {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(error_from_response(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Map a non-2xx response to an error, preferring the nested
/// `{"error": {"message": ...}}` text over the status line.
pub fn error_from_response(status: StatusCode, body: &str) -> GscoutError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));

    match status.as_u16() {
        http_status::UNAUTHORIZED | http_status::FORBIDDEN => GscoutError::Auth(message),
        code => GscoutError::Api {
            status: code,
            message,
        },
    }
}

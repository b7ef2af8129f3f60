//! Core Twitter API utilities.
//!
//! This module contains the low-level client for the two v1.1 lookups used by
//! link previews. Every request is signed with OAuth 1.0a from the consumer
//! credentials; no session or token state is kept between calls.

use log::{debug, error, info};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::TwitterConfig;
use crate::error::{TwitterError, TwitterResult};
use crate::oauth::OAuthSigner;

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in bytes before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.len() > max_len {
        let cut = sanitized
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= max_len)
            .last()
            .unwrap_or(0);
        format!(
            "{}... [truncated, {} total bytes]",
            &sanitized[..cut],
            text.len()
        )
    } else {
        sanitized
    }
}

/// Client for the status and user lookup endpoints.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    signer: OAuthSigner,
    api_base: String,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> Self {
        Self {
            http: Client::new(),
            signer: OAuthSigner::new(config),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches a single status in extended (untruncated) mode.
    ///
    /// Returns the decoded body whatever the HTTP status was; Twitter
    /// reports missing or protected tweets as an `errors` payload.
    pub async fn fetch_status(&self, id: &str) -> TwitterResult<Value> {
        info!("Looking up status ID {}", id);
        let path = format!("/statuses/show/{}.json", id);
        let params = vec![("tweet_mode".to_string(), "extended".to_string())];
        self.signed_get(&path, params, &format!("status ID {}", id))
            .await
    }

    /// Fetches a user profile by screen name.
    pub async fn fetch_user(&self, screen_name: &str) -> TwitterResult<Value> {
        info!("Looking up screen name {}", screen_name);
        let params = vec![("screen_name".to_string(), screen_name.to_string())];
        self.signed_get(
            "/users/show.json",
            params,
            &format!("screen name {}", screen_name),
        )
        .await
    }

    async fn signed_get(
        &self,
        path: &str,
        params: Vec<(String, String)>,
        subject: &str,
    ) -> TwitterResult<Value> {
        let endpoint = format!("{}{}", self.api_base, path);
        let url = Url::parse_with_params(&endpoint, &params)
            .map_err(|e| TwitterError::Config(format!("invalid API URL '{}': {}", endpoint, e)))?;
        let auth_header = self.signer.authorization_header("GET", &endpoint, &params)?;

        debug!("Request URL: {}", url);
        debug!("Request headers: Authorization: OAuth [REDACTED]");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "{} error reaching the twitter API for {}",
                status.as_u16(),
                subject
            );
        }

        let body = response.text().await?;
        debug!(
            "Response summary for {}: {} bytes received",
            subject,
            body.len()
        );

        serde_json::from_str(&body).map_err(|e| {
            error!(
                "Response for {} is not valid JSON: {} ({})",
                subject,
                e,
                sanitize_for_logging(&body, 200)
            );
            TwitterError::Malformed(format!("response for {} is not JSON: {}", subject, e))
        })
    }
}

//! Configuration module for the twitlink service.
//!
//! This module contains configuration structures and environment variable handling
//! for the Twitter API integration and the viewer time preferences.

use chrono_tz::Tz;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use crate::error::{TwitterError, TwitterResult};
use crate::timefmt::{TimeSettings, DEFAULT_TIME_FORMAT};

/// Default REST endpoint root for the v1.1 API.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

/// How a quoted tweet is presented next to the tweet quoting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteLayout {
    /// The quoted tweet gets its own output line with its own stats.
    #[default]
    SeparateLine,
    /// The quoted tweet is appended to the quoting tweet's text.
    InlineSuffix,
}

impl FromStr for QuoteLayout {
    type Err = TwitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "separate_line" => Ok(Self::SeparateLine),
            "inline_suffix" => Ok(Self::InlineSuffix),
            other => Err(TwitterError::Config(format!(
                "unknown quote layout '{}', expected separate_line or inline_suffix",
                other
            ))),
        }
    }
}

/// Configuration struct for Twitter API credentials and display preferences.
///
/// The v1.1 lookup endpoints are called with application-only OAuth 1.0a
/// signing, so only the consumer key and secret are needed.
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// The OAuth consumer key
    pub consumer_key: String,
    /// The OAuth consumer secret
    pub consumer_secret: String,
    /// Whether the tweet quoted by a status is shown at all
    pub show_quoted_tweets: bool,
    /// Where a shown quoted tweet goes
    pub quote_layout: QuoteLayout,
    /// Root of the REST API, without trailing slash
    pub api_base: String,
}

/// Masks a secret for logging. At most four characters are kept: two at
/// each end, and only when the secret is longer than eight characters.
fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return "...".to_string();
    }
    let prefix: String = secret.chars().take(2).collect();
    let suffix: String = secret.chars().skip(len - 2).collect();
    format!("{}...{}", prefix, suffix)
}

/// Parses the boolean spellings accepted in configuration files.
fn parse_bool(name: &str, value: &str) -> TwitterResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        other => Err(TwitterError::Config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}

fn parse_timezone(name: &str, value: &str) -> TwitterResult<Tz> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|e| TwitterError::Config(format!("{} has invalid timezone: {}", name, e)))
}

/// Parses a `key=Zone,key2=Zone2` override list. Keys are lowercased because
/// nicks and channel names are case-insensitive on IRC.
fn parse_timezone_map(name: &str, value: &str) -> TwitterResult<HashMap<String, Tz>> {
    let mut map = HashMap::new();
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, zone) = entry.split_once('=').ok_or_else(|| {
            TwitterError::Config(format!("{} entry '{}' is not key=Zone", name, entry))
        })?;
        map.insert(key.trim().to_lowercase(), parse_timezone(name, zone)?);
    }
    Ok(map)
}

/// Parses a `key=format,key2=format2` override list. Only the first `=` of
/// an entry separates key from format.
fn parse_format_map(name: &str, value: &str) -> TwitterResult<HashMap<String, String>> {
    let mut map = HashMap::new();
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((key, format)) if !key.trim().is_empty() && !format.trim().is_empty() => {
                map.insert(key.trim().to_lowercase(), format.to_string());
            }
            _ => {
                return Err(TwitterError::Config(format!(
                    "{} entry '{}' is not key=format",
                    name, entry
                )))
            }
        }
    }
    Ok(map)
}

/// Reads a required, non-empty credential and logs it masked.
fn required_secret<F>(lookup: &F, name: &str) -> TwitterResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            info!(
                "Found {} environment variable with length: {}",
                name,
                value.len()
            );
            debug!("{} (masked): {}", name, mask_secret(&value));
            Ok(value.trim().to_string())
        }
        Some(_) => {
            error!("{} is empty", name);
            Err(TwitterError::Config(format!("{} cannot be empty", name)))
        }
        None => {
            error!("Make sure {} environment variable is set", name);
            Err(TwitterError::Config(format!(
                "Missing {} environment variable",
                name
            )))
        }
    }
}

impl TwitterConfig {
    /// Creates a configuration with default display preferences.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            show_quoted_tweets: true,
            quote_layout: QuoteLayout::default(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Creates a new `TwitterConfig` instance by loading settings from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `twitter_consumer_key`: OAuth consumer key
    /// - `twitter_consumer_secret`: OAuth consumer secret
    ///
    /// # Optional Environment Variables
    ///
    /// - `twitter_show_quoted_tweets`: show quoted tweets (default `true`)
    /// - `twitter_quote_layout`: `separate_line` (default) or `inline_suffix`
    /// - `twitter_api_base`: REST root (default `https://api.twitter.com/1.1`)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use twitlink::TwitterConfig;
    ///
    /// std::env::set_var("twitter_consumer_key", "your_consumer_key");
    /// std::env::set_var("twitter_consumer_secret", "your_consumer_secret");
    /// let config = TwitterConfig::from_env().unwrap();
    /// assert!(config.show_quoted_tweets);
    /// ```
    pub fn from_env() -> TwitterResult<Self> {
        info!("Loading Twitter configuration from environment variables");
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> TwitterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let consumer_key = required_secret(&lookup, "twitter_consumer_key")?;
        let consumer_secret = required_secret(&lookup, "twitter_consumer_secret")?;

        let show_quoted_tweets = match lookup("twitter_show_quoted_tweets") {
            Some(value) => parse_bool("twitter_show_quoted_tweets", &value)?,
            None => true,
        };

        let quote_layout = match lookup("twitter_quote_layout") {
            Some(value) => value.parse()?,
            None => QuoteLayout::default(),
        };

        let api_base = match lookup("twitter_api_base") {
            Some(value) if !value.trim().is_empty() => {
                let base = value.trim().trim_end_matches('/').to_string();
                warn!("Using non-default Twitter API base: {}", base);
                base
            }
            _ => DEFAULT_API_BASE.to_string(),
        };

        let config = TwitterConfig {
            consumer_key,
            consumer_secret,
            show_quoted_tweets,
            quote_layout,
            api_base,
        };

        info!(
            "Twitter configuration loaded (show_quoted_tweets: {}, quote_layout: {:?})",
            config.show_quoted_tweets, config.quote_layout
        );
        Ok(config)
    }
}

/// Loads the viewer time preferences from environment variables.
///
/// - `twitter_timezone`: default IANA zone (default `UTC`)
/// - `twitter_time_format`: default strftime format
/// - `twitter_user_timezones`: `nick=Zone,...`
/// - `twitter_channel_timezones`: `#channel=Zone,...`
/// - `twitter_user_time_formats`: `nick=format,...`
/// - `twitter_channel_time_formats`: `#channel=format,...`
///
/// A format override cannot contain `,` because entries are comma separated.
pub fn load_time_settings() -> TwitterResult<TimeSettings> {
    time_settings_from_vars(|name| env::var(name).ok())
}

/// Builds the time preferences from an arbitrary variable lookup.
pub fn time_settings_from_vars<F>(lookup: F) -> TwitterResult<TimeSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let default_zone = match lookup("twitter_timezone") {
        Some(value) if !value.trim().is_empty() => parse_timezone("twitter_timezone", &value)?,
        _ => Tz::UTC,
    };
    let default_format = match lookup("twitter_time_format") {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_TIME_FORMAT.to_string(),
    };

    let mut settings = TimeSettings::new(default_zone, default_format);
    if let Some(value) = lookup("twitter_user_timezones") {
        for (nick, zone) in parse_timezone_map("twitter_user_timezones", &value)? {
            settings = settings.with_user_timezone(&nick, zone);
        }
    }
    if let Some(value) = lookup("twitter_channel_timezones") {
        for (channel, zone) in parse_timezone_map("twitter_channel_timezones", &value)? {
            settings = settings.with_channel_timezone(&channel, zone);
        }
    }
    if let Some(value) = lookup("twitter_user_time_formats") {
        for (nick, format) in parse_format_map("twitter_user_time_formats", &value)? {
            settings = settings.with_user_time_format(&nick, format);
        }
    }
    if let Some(value) = lookup("twitter_channel_time_formats") {
        for (channel, format) in parse_format_map("twitter_channel_time_formats", &value)? {
            settings = settings.with_channel_time_format(&channel, format);
        }
    }
    debug!("Time settings loaded: {:?}", settings);
    Ok(settings)
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set, it defaults to 3000.
///
/// # Example
///
/// ```rust
/// use twitlink::get_server_port;
///
/// std::env::remove_var("PORT");
/// assert_eq!(get_server_port().unwrap(), 3000);
/// ```
pub fn get_server_port() -> TwitterResult<u16> {
    match env::var("PORT") {
        Ok(value) => value
            .parse()
            .map_err(|_| TwitterError::Config(format!("PORT must be a valid number, got '{}'", value))),
        Err(_) => Ok(3000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timefmt::TimePreferences;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_credentials_are_set() {
        let config = TwitterConfig::from_vars(vars(&[
            ("twitter_consumer_key", "key"),
            ("twitter_consumer_secret", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.consumer_key, "key");
        assert_eq!(config.consumer_secret, "secret");
        assert!(config.show_quoted_tweets);
        assert_eq!(config.quote_layout, QuoteLayout::SeparateLine);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let err = TwitterConfig::from_vars(vars(&[("twitter_consumer_key", "key")])).unwrap_err();
        assert!(err.to_string().contains("twitter_consumer_secret"));

        let err = TwitterConfig::from_vars(vars(&[
            ("twitter_consumer_key", "  "),
            ("twitter_consumer_secret", "secret"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_display_preferences_are_parsed() {
        let config = TwitterConfig::from_vars(vars(&[
            ("twitter_consumer_key", "key"),
            ("twitter_consumer_secret", "secret"),
            ("twitter_show_quoted_tweets", "off"),
            ("twitter_quote_layout", "inline-suffix"),
            ("twitter_api_base", "http://127.0.0.1:9999/1.1/"),
        ]))
        .unwrap();

        assert!(!config.show_quoted_tweets);
        assert_eq!(config.quote_layout, QuoteLayout::InlineSuffix);
        assert_eq!(config.api_base, "http://127.0.0.1:9999/1.1");
    }

    #[test]
    fn test_invalid_boolean_and_layout_are_rejected() {
        assert!(TwitterConfig::from_vars(vars(&[
            ("twitter_consumer_key", "key"),
            ("twitter_consumer_secret", "secret"),
            ("twitter_show_quoted_tweets", "sometimes"),
        ]))
        .is_err());
        assert!("sideways".parse::<QuoteLayout>().is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "...");
        assert_eq!(mask_secret("12345678"), "...");
        assert_eq!(mask_secret("0123456789abcdefXYZ"), "01...YZ");
        let masked = mask_secret("a-very-long-consumer-secret-value-0123456789");
        assert_eq!(masked.chars().filter(|c| *c != '.').count(), 4);
    }

    #[test]
    fn test_time_settings_overrides() {
        let settings = time_settings_from_vars(vars(&[
            ("twitter_timezone", "Europe/Berlin"),
            ("twitter_user_timezones", "Alice=America/New_York, bob=Asia/Tokyo"),
            ("twitter_channel_timezones", "#Rust=Europe/London"),
        ]))
        .unwrap();

        assert_eq!(settings.default_timezone(), Tz::Europe__Berlin);
        assert_eq!(settings.timezone_for("alice", "#other"), Tz::America__New_York);
        assert_eq!(settings.timezone_for("carol", "#rust"), Tz::Europe__London);
        assert_eq!(settings.timezone_for("carol", "#other"), Tz::Europe__Berlin);
    }

    #[test]
    fn test_time_format_overrides_follow_precedence() {
        let settings = time_settings_from_vars(vars(&[
            ("twitter_time_format", "%Y"),
            ("twitter_user_time_formats", "Alice=%H:%M %Z, bob=%d.%m.%Y"),
            ("twitter_channel_time_formats", "#Rust=%Y-%m-%d,#eq=a=b"),
        ]))
        .unwrap();

        assert_eq!(settings.time_format_for("alice", "#rust"), "%H:%M %Z");
        assert_eq!(settings.time_format_for("BOB", "#other"), "%d.%m.%Y");
        assert_eq!(settings.time_format_for("carol", "#rust"), "%Y-%m-%d");
        assert_eq!(settings.time_format_for("carol", "#eq"), "a=b");
        assert_eq!(settings.time_format_for("carol", "#other"), "%Y");
    }

    #[test]
    fn test_time_format_overrides_reject_bad_entries() {
        assert!(
            time_settings_from_vars(vars(&[("twitter_user_time_formats", "alice")])).is_err()
        );
        assert!(
            time_settings_from_vars(vars(&[("twitter_channel_time_formats", "#rust=")])).is_err()
        );
    }

    #[test]
    fn test_time_settings_reject_bad_zone() {
        assert!(time_settings_from_vars(vars(&[("twitter_timezone", "Mars/Olympus")])).is_err());
        assert!(
            time_settings_from_vars(vars(&[("twitter_user_timezones", "alice")])).is_err()
        );
    }
}

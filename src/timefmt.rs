//! Timestamp rendering for viewers in different timezones.
//!
//! Twitter's v1.1 API reports times as `Wed Oct 10 20:19:24 +0000 2018`. These
//! are converted into the zone and format preferred by whoever triggered the
//! lookup, falling back to the channel's preference and then the configured
//! default.

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use log::warn;
use std::collections::HashMap;
use std::fmt::Write;

/// strftime pattern of Twitter's `created_at` fields.
pub const TWITTER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Format used when neither the user, the channel nor the configuration sets one.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d - %H:%M:%S %Z";

/// Per-viewer timezone and time format lookup supplied by the host bot.
pub trait TimePreferences: Send + Sync {
    /// Zone to render times in for `nick` speaking in `channel`.
    fn timezone_for(&self, nick: &str, channel: &str) -> Tz;
    /// strftime format to render times with for `nick` speaking in `channel`.
    fn time_format_for(&self, nick: &str, channel: &str) -> String;
}

/// In-memory preference table: user override, then channel override, then default.
#[derive(Debug, Clone)]
pub struct TimeSettings {
    default_zone: Tz,
    default_format: String,
    user_zones: HashMap<String, Tz>,
    channel_zones: HashMap<String, Tz>,
    user_formats: HashMap<String, String>,
    channel_formats: HashMap<String, String>,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self::new(Tz::UTC, DEFAULT_TIME_FORMAT)
    }
}

impl TimeSettings {
    pub fn new(default_zone: Tz, default_format: impl Into<String>) -> Self {
        Self {
            default_zone,
            default_format: default_format.into(),
            user_zones: HashMap::new(),
            channel_zones: HashMap::new(),
            user_formats: HashMap::new(),
            channel_formats: HashMap::new(),
        }
    }

    pub fn with_user_timezone(mut self, nick: &str, zone: Tz) -> Self {
        self.user_zones.insert(nick.to_lowercase(), zone);
        self
    }

    pub fn with_channel_timezone(mut self, channel: &str, zone: Tz) -> Self {
        self.channel_zones.insert(channel.to_lowercase(), zone);
        self
    }

    pub fn with_user_time_format(mut self, nick: &str, format: impl Into<String>) -> Self {
        self.user_formats.insert(nick.to_lowercase(), format.into());
        self
    }

    pub fn with_channel_time_format(mut self, channel: &str, format: impl Into<String>) -> Self {
        self.channel_formats
            .insert(channel.to_lowercase(), format.into());
        self
    }

    pub fn default_timezone(&self) -> Tz {
        self.default_zone
    }
}

impl TimePreferences for TimeSettings {
    fn timezone_for(&self, nick: &str, channel: &str) -> Tz {
        self.user_zones
            .get(&nick.to_lowercase())
            .or_else(|| self.channel_zones.get(&channel.to_lowercase()))
            .copied()
            .unwrap_or(self.default_zone)
    }

    fn time_format_for(&self, nick: &str, channel: &str) -> String {
        self.user_formats
            .get(&nick.to_lowercase())
            .or_else(|| self.channel_formats.get(&channel.to_lowercase()))
            .unwrap_or(&self.default_format)
            .clone()
    }
}

/// Parses a Twitter `created_at` value into an absolute point in time.
pub fn parse_twitter_timestamp(stamp: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(stamp.trim(), TWITTER_TIMESTAMP_FORMAT)
}

/// Renders a Twitter timestamp in `zone` using the strftime `format`.
///
/// A stamp that cannot be parsed is returned verbatim. A format chrono
/// cannot render falls back to [`DEFAULT_TIME_FORMAT`].
pub fn format_timestamp(stamp: &str, zone: Tz, format: &str) -> String {
    let parsed = match parse_twitter_timestamp(stamp) {
        Ok(parsed) => parsed.with_timezone(&zone),
        Err(e) => {
            warn!("Could not parse Twitter timestamp '{}': {}", stamp, e);
            return stamp.to_string();
        }
    };

    let mut rendered = String::new();
    if write!(rendered, "{}", parsed.format(format)).is_ok() {
        return rendered;
    }

    warn!("Invalid time format '{}', using default", format);
    parsed.format(DEFAULT_TIME_FORMAT).to_string()
}

/// Renders a Twitter timestamp for the viewer identified by `nick` and `channel`.
pub fn format_time_for(
    prefs: &dyn TimePreferences,
    nick: &str,
    channel: &str,
    stamp: &str,
) -> String {
    let zone = prefs.timezone_for(nick, channel);
    let format = prefs.time_format_for(nick, channel);
    format_timestamp(stamp, zone, &format)
}

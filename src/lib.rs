//! # Twitlink Library
//!
//! A chat-bot link previewer for Twitter. Status and profile links found in
//! chat messages are looked up through the Twitter REST API v1.1 and turned
//! into one-line summaries ready to be sent back to the channel.
//!
//! ## Features
//!
//! - Detection of `twitter.com` status and profile links
//! - OAuth 1.0a signed lookups using application consumer credentials
//! - Tweet text reconstruction (expanded links, media, quote tweets)
//! - Profile summaries with follower counts and expanded biography links
//! - Timestamps rendered in each viewer's timezone
//! - HTTP host adapter (`POST /message`, `GET /health`)
//!
//! ## Configuration
//!
//! - `twitter_consumer_key`, `twitter_consumer_secret`: required credentials
//! - `twitter_show_quoted_tweets`: show quoted tweets (default `true`)
//! - `twitter_quote_layout`: `separate_line` (default) or `inline_suffix`
//! - `twitter_timezone`, `twitter_time_format`: default time rendering
//! - `twitter_user_timezones`, `twitter_channel_timezones`: per-viewer zones
//! - `twitter_user_time_formats`, `twitter_channel_time_formats`: per-viewer formats
//! - `PORT`: Server port (defaults to 3000)

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod oauth;
pub mod text;
pub mod timefmt;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{get_server_port, load_time_settings, QuoteLayout, TwitterConfig};
pub use dispatch::{find_links, match_link, LinkTarget, Trigger, TwitterPlugin};
pub use error::{TwitterError, TwitterResult};
pub use handlers::create_app;
pub use timefmt::{TimePreferences, TimeSettings};

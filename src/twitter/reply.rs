//! Assembly of the lines sent back to the channel.

use log::debug;

use super::format::format_tweet;
use super::types::{ApiErrorEntry, Tweet};
use crate::config::QuoteLayout;

/// Line sent when Twitter's answer cannot be interpreted.
pub const MALFORMED_REPLY: &str = "[Twitter] Received a response I couldn't understand.";

/// Line sent when the API could not be reached at all.
pub const UNREACHABLE_REPLY: &str = "[Twitter] Couldn't reach the Twitter API.";

/// Which lookup produced an error; selects the fallback wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Status,
    User,
}

impl LookupKind {
    fn missing_hint(self) -> &'static str {
        match self {
            Self::Status => ". :( Maybe the tweet was deleted?",
            Self::User => ". :( Maybe that user doesn't exist?",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Status => "Tweet ID",
            Self::User => "Screen name",
        }
    }
}

/// Turns the first entry of an `errors` payload into a chat line.
///
/// `target` is the status ID or screen name, used for the debug log only.
pub fn error_line(entry: &ApiErrorEntry, kind: LookupKind, target: &str) -> String {
    let mut msg = String::from("Twitter returned an error");
    match entry.message.as_deref() {
        Some(message) => {
            msg.push_str(": ");
            msg.push_str(message);
            if !msg.ends_with('.') {
                msg.push('.');
            }
        }
        None => msg.push_str(kind.missing_hint()),
    }

    debug!(
        "{} {} returned error code {}: \"{}\"",
        kind.subject(),
        target,
        entry.code.unwrap_or(-1),
        entry.message.as_deref().unwrap_or("(unknown description)")
    );
    msg
}

fn stats_line(tweet_field: &str, tweet: &Tweet, posted: &str) -> String {
    format!(
        "[Twitter] {} | {} RTs | {} \u{2665}s | Posted: {}",
        tweet_field, tweet.retweet_count, tweet.favorite_count, posted
    )
}

/// Builds the one or two lines describing a tweet.
///
/// `render_time` turns a Twitter `created_at` value into the viewer's
/// local representation.
pub fn status_lines<F>(
    tweet: &Tweet,
    show_quoted: bool,
    layout: QuoteLayout,
    render_time: F,
) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let formatted = format_tweet(tweet);
    let quoted = tweet
        .quoted_status
        .as_deref()
        .filter(|_| tweet.is_quote_status && show_quoted);

    if tweet.is_quote_status && show_quoted && quoted.is_none() {
        debug!("Quote tweet carries no quoted_status; showing it alone");
    }

    match (quoted, layout) {
        (Some(quoted), QuoteLayout::SeparateLine) => vec![
            stats_line(&formatted, tweet, &render_time(&tweet.created_at)),
            stats_line(
                &format!("Quoting: {}", format_tweet(quoted)),
                quoted,
                &render_time(&quoted.created_at),
            ),
        ],
        (Some(quoted), QuoteLayout::InlineSuffix) => vec![stats_line(
            &format!("{} (Quoting: {})", formatted, format_tweet(quoted)),
            tweet,
            &render_time(&tweet.created_at),
        )],
        (None, _) => vec![stats_line(
            &formatted,
            tweet,
            &render_time(&tweet.created_at),
        )],
    }
}

//! Twitter API integration module.
//!
//! This module contains the v1.1 lookup client, typed views of its payloads
//! and the formatting that turns them into chat lines.

mod api;
mod format;
mod profile;
mod reply;
mod types;

// Re-export public API
pub use api::TwitterClient;
pub use format::{format_tweet, LINE_BREAK};
pub use profile::{format_user, user_reply_line, PROTECTED_GLYPH, VERIFIED_GLYPH};
pub use reply::{error_line, status_lines, LookupKind, MALFORMED_REPLY, UNREACHABLE_REPLY};
pub use types::{
    decode_reply, decode_tweet, decode_user, ApiErrorEntry, ApiReply, MediaEntity, Tweet,
    TweetAuthor, UrlEntity, UserProfile,
};

// Crate-internal re-exports (used by tests)
#[cfg(test)]
pub(crate) use types::fixtures;

//! Typed views of the v1.1 API payloads used for link previews.
//!
//! Only the fields that end up in a preview are modelled. Fields Twitter
//! omits depending on context are `Option` or defaulted, while fields every
//! payload carries are required so that a truncated or unrelated body is
//! reported as malformed instead of rendering half a preview.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{TwitterError, TwitterResult};

/// A `t.co` link and the address it stands for.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UrlEntity {
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
}

impl UrlEntity {
    /// The expanded address, or the short link when Twitter gave none.
    pub fn expanded(&self) -> &str {
        self.expanded_url.as_deref().unwrap_or(&self.url)
    }
}

/// A photo/video attachment and its direct media address.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MediaEntity {
    pub url: String,
    pub media_url_https: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
}

/// Only present when the tweet carries media.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtendedEntities {
    #[serde(default)]
    pub media: Vec<MediaEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetAuthor {
    pub name: String,
    pub screen_name: String,
}

/// A status as returned by `statuses/show` in extended mode.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub entities: TweetEntities,
    #[serde(default)]
    pub extended_entities: Option<ExtendedEntities>,
    #[serde(default)]
    pub is_quote_status: bool,
    #[serde(default)]
    pub quoted_status_id_str: Option<String>,
    #[serde(default)]
    pub quoted_status: Option<Box<Tweet>>,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub created_at: String,
    pub user: TweetAuthor,
}

impl Tweet {
    /// The untruncated text when available, else the classic 140-char field.
    pub fn display_text(&self) -> &str {
        self.full_text
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or_default()
    }

    pub fn media(&self) -> &[MediaEntity] {
        self.extended_entities
            .as_ref()
            .map(|e| e.media.as_slice())
            .unwrap_or_default()
    }

    /// Rejects tweets (and quoted tweets) carrying neither text field.
    fn validate(&self) -> TwitterResult<()> {
        if self.full_text.is_none() && self.text.is_none() {
            return Err(TwitterError::Malformed(
                "tweet has neither full_text nor text".to_string(),
            ));
        }
        match &self.quoted_status {
            Some(quoted) => quoted.validate(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityUrls {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEntities {
    #[serde(default)]
    pub url: Option<EntityUrls>,
    #[serde(default)]
    pub description: Option<EntityUrls>,
}

/// A profile as returned by `users/show`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub screen_name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entities: UserEntities,
    pub friends_count: u64,
    pub followers_count: u64,
    pub statuses_count: u64,
    pub favourites_count: u64,
    pub created_at: String,
}

/// One entry of an `errors` array.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A decoded response body: either Twitter's error payload or the entity.
#[derive(Debug)]
pub enum ApiReply<T> {
    Error(ApiErrorEntry),
    Ok(T),
}

/// Classifies a raw body. A non-empty `errors` array wins over everything
/// else; otherwise the body must deserialize into `T`.
pub fn decode_reply<T: DeserializeOwned>(body: Value) -> TwitterResult<ApiReply<T>> {
    if let Some(first) = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let entry = serde_json::from_value(first.clone()).unwrap_or_default();
        return Ok(ApiReply::Error(entry));
    }

    serde_json::from_value(body)
        .map(ApiReply::Ok)
        .map_err(|e| TwitterError::Malformed(e.to_string()))
}

pub fn decode_tweet(body: Value) -> TwitterResult<ApiReply<Tweet>> {
    let reply = decode_reply::<Tweet>(body)?;
    if let ApiReply::Ok(tweet) = &reply {
        tweet.validate()?;
    }
    Ok(reply)
}

pub fn decode_user(body: Value) -> TwitterResult<ApiReply<UserProfile>> {
    decode_reply(body)
}

//! Tweet text reconstruction.
//!
//! Twitter hands back tweet bodies with every link wrapped in `t.co`, the
//! first media attachment referenced by a `t.co` link and quote tweets
//! carrying a trailing link to the quoted status. This module turns that into
//! a single readable chat line.

use regex::Regex;

use super::types::Tweet;

/// Stand-in for a line break so the tweet fits on one chat line.
pub const LINE_BREAK: &str = " \u{23CE} ";

/// Replaces `\r\n`, `\n` and lone `\r` with [`LINE_BREAK`].
pub(crate) fn fold_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\r', '\n'], LINE_BREAK)
}

/// Formats a tweet as `Name (@screen_name): text`.
///
/// No truncation happens here; the output boundary decides on length.
pub fn format_tweet(tweet: &Tweet) -> String {
    let mut text = fold_line_breaks(tweet.display_text());

    if tweet.is_quote_status {
        text = strip_quote_link(&text, tweet);
    }

    // Media first: the generic URL pass below would otherwise never see them.
    for item in tweet.media() {
        if text.contains(&item.url) {
            text = text.replace(&item.url, &item.media_url_https);
        } else {
            // Only the first attachment is linked from the body.
            if !text.is_empty() && !text.ends_with(' ') {
                text.push(' ');
            }
            text.push_str(&item.media_url_https);
        }
    }

    for url in &tweet.entities.urls {
        text = text.replace(&url.url, url.expanded());
    }

    format!("{} (@{}): {}", tweet.user.name, tweet.user.screen_name, text)
}

/// Removes the link pointing at the quoted status, with its surrounding
/// whitespace. Only the first entity whose last path segment is the quoted
/// status ID is considered.
fn strip_quote_link(text: &str, tweet: &Tweet) -> String {
    let Some(quoted_id) = tweet.quoted_status_id_str.as_deref() else {
        return text.to_string();
    };

    let link = tweet.entities.urls.iter().find(|url| {
        url.expanded()
            .rsplit_once('/')
            .is_some_and(|(_, last)| last == quoted_id)
    });

    match link {
        Some(link) => match Regex::new(&format!(r"\s*{}\s*", regex::escape(&link.url))) {
            Ok(re) => re.replace_all(text, "").into_owned(),
            Err(_) => text.to_string(),
        },
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twitter::types::{ApiReply, decode_tweet};
    use serde_json::{json, Value};

    fn tweet(body: Value) -> Tweet {
        match decode_tweet(body).unwrap() {
            ApiReply::Ok(tweet) => tweet,
            ApiReply::Error(e) => panic!("unexpected error reply: {:?}", e),
        }
    }

    fn base(text: &str) -> Value {
        json!({
            "full_text": text,
            "entities": {"urls": []},
            "retweet_count": 0,
            "favorite_count": 0,
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "user": {"name": "Jack", "screen_name": "jack"}
        })
    }

    #[test]
    fn test_expands_url_entities() {
        let mut body = base("check this out t.co/abc");
        body["entities"]["urls"] = json!([{"url": "t.co/abc", "expanded_url": "http://example.com/page"}]);

        let out = format_tweet(&tweet(body));
        assert_eq!(out, "Jack (@jack): check this out http://example.com/page");
        assert!(!out.contains("t.co/abc"));
    }

    #[test]
    fn test_short_text_fallback_is_verbatim() {
        let mut body = base("");
        body.as_object_mut().unwrap().remove("full_text");
        body["text"] = json!("just setting up my twttr");
        assert_eq!(format_tweet(&tweet(body)), "Jack (@jack): just setting up my twttr");
    }

    #[test]
    fn test_carriage_returns_become_glyph() {
        let out = format_tweet(&tweet(base("one\r\ntwo\rthree")));
        assert!(!out.contains(['\r', '\n']));
        assert_eq!(out, "Jack (@jack): one \u{23CE} two \u{23CE} three");
    }

    #[test]
    fn test_newlines_become_glyph() {
        let out = format_tweet(&tweet(base("line one\nline two\n\nthree")));
        assert!(!out.contains('\n'));
        assert_eq!(
            out,
            "Jack (@jack): line one \u{23CE} line two \u{23CE}  \u{23CE} three"
        );
    }

    #[test]
    fn test_quote_link_removed_with_whitespace() {
        let mut body = base("so true https://t.co/q");
        body["is_quote_status"] = json!(true);
        body["quoted_status_id_str"] = json!("123");
        body["entities"]["urls"] = json!([
            {"url": "https://t.co/q", "expanded_url": "https://twitter.com/someone/status/123"}
        ]);

        assert_eq!(format_tweet(&tweet(body)), "Jack (@jack): so true");
    }

    #[test]
    fn test_quote_link_only_first_matching_entity() {
        let mut body = base("see https://t.co/a and https://t.co/b");
        body["is_quote_status"] = json!(true);
        body["quoted_status_id_str"] = json!("123");
        body["entities"]["urls"] = json!([
            {"url": "https://t.co/a", "expanded_url": "https://example.com/123/page"},
            {"url": "https://t.co/b", "expanded_url": "https://twitter.com/x/status/123"},
            {"url": "https://t.co/c", "expanded_url": "https://twitter.com/y/status/123"}
        ]);

        let out = format_tweet(&tweet(body));
        assert_eq!(out, "Jack (@jack): see https://example.com/123/page and");
    }

    #[test]
    fn test_quote_link_kept_when_not_a_quote() {
        let mut body = base("see https://t.co/b");
        body["quoted_status_id_str"] = json!("123");
        body["entities"]["urls"] = json!([
            {"url": "https://t.co/b", "expanded_url": "https://twitter.com/x/status/123"}
        ]);

        assert_eq!(
            format_tweet(&tweet(body)),
            "Jack (@jack): see https://twitter.com/x/status/123"
        );
    }

    #[test]
    fn test_media_replaced_then_appended_in_order() {
        let mut body = base("pics https://t.co/m1");
        body["extended_entities"] = json!({"media": [
            {"url": "https://t.co/m1", "media_url_https": "https://pbs.twimg.com/media/1.jpg"},
            {"url": "https://t.co/m1", "media_url_https": "https://pbs.twimg.com/media/2.jpg"},
            {"url": "https://t.co/m1", "media_url_https": "https://pbs.twimg.com/media/3.jpg"}
        ]});

        assert_eq!(
            format_tweet(&tweet(body)),
            "Jack (@jack): pics https://pbs.twimg.com/media/1.jpg https://pbs.twimg.com/media/2.jpg https://pbs.twimg.com/media/3.jpg"
        );
    }

    #[test]
    fn test_media_handled_before_generic_urls() {
        let mut body = base("look https://t.co/m");
        body["entities"]["urls"] = json!([
            {"url": "https://t.co/m", "expanded_url": "https://twitter.com/jack/status/1/photo/1"}
        ]);
        body["extended_entities"] = json!({"media": [
            {"url": "https://t.co/m", "media_url_https": "https://pbs.twimg.com/media/x.jpg"}
        ]});

        assert_eq!(
            format_tweet(&tweet(body)),
            "Jack (@jack): look https://pbs.twimg.com/media/x.jpg"
        );
    }

    #[test]
    fn test_no_shortened_urls_survive() {
        let mut body = base("a https://t.co/1 b https://t.co/2 c https://t.co/1");
        body["entities"]["urls"] = json!([
            {"url": "https://t.co/1", "expanded_url": "https://one.example"},
            {"url": "https://t.co/2", "expanded_url": "https://two.example"}
        ]);

        let out = format_tweet(&tweet(body));
        assert!(!out.contains("t.co"));
        assert_eq!(
            out,
            "Jack (@jack): a https://one.example b https://two.example c https://one.example"
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let mut body = base("x https://t.co/1\ny");
        body["entities"]["urls"] = json!([{"url": "https://t.co/1", "expanded_url": "https://one.example"}]);
        let tweet = tweet(body);
        assert_eq!(format_tweet(&tweet), format_tweet(&tweet));
    }
}

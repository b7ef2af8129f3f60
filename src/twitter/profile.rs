//! Profile summary line.

use super::format::fold_line_breaks;
use super::types::UserProfile;
use crate::text::{truncate_with_ellipsis, with_thousands, MAX_MESSAGE_BYTES};

pub const VERIFIED_GLYPH: &str = " \u{2714}\u{FE0F}";
pub const PROTECTED_GLYPH: &str = " \u{1F512}";

/// The profile's website with the `t.co` wrapper removed.
fn expanded_profile_url(user: &UserProfile) -> Option<&str> {
    let url = user.url.as_deref().filter(|u| !u.is_empty())?;
    let expanded = user
        .entities
        .url
        .as_ref()
        .and_then(|e| e.urls.first())
        .map(|e| e.expanded())
        .unwrap_or(url);
    Some(expanded)
}

/// The biography with every `t.co` link replaced by its destination and
/// line breaks folded into the break glyph.
fn expanded_bio(user: &UserProfile) -> Option<String> {
    let description = user.description.as_deref().filter(|d| !d.is_empty())?;
    let mut bio = fold_line_breaks(description);
    if let Some(entities) = &user.entities.description {
        for link in &entities.urls {
            bio = bio.replace(&link.url, link.expanded());
        }
    }
    Some(bio)
}

/// Builds the full profile line; `joined` is the already-rendered join date.
pub fn format_user(user: &UserProfile, joined: &str) -> String {
    let mut line = format!(
        "[Twitter] {} (@{})",
        fold_line_breaks(&user.name),
        user.screen_name
    );

    if user.verified {
        line.push_str(VERIFIED_GLYPH);
    }
    if user.protected {
        line.push_str(PROTECTED_GLYPH);
    }
    if let Some(location) = user.location.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(" | ");
        line.push_str(&fold_line_breaks(location));
    }
    if let Some(url) = expanded_profile_url(user) {
        line.push_str(" | ");
        line.push_str(url);
    }

    line.push_str(&format!(
        " | {} friends, {} followers | {} tweets, {} \u{2665}s | Joined: {}",
        with_thousands(user.friends_count),
        with_thousands(user.followers_count),
        with_thousands(user.statuses_count),
        with_thousands(user.favourites_count),
        joined
    ));

    if let Some(bio) = expanded_bio(user) {
        line.push_str(" | ");
        line.push_str(&bio);
    }

    line
}

/// The profile line cut to the message budget.
pub fn user_reply_line(user: &UserProfile, joined: &str) -> String {
    truncate_with_ellipsis(&format_user(user, joined), MAX_MESSAGE_BYTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ELLIPSIS;
    use crate::twitter::LINE_BREAK;
    use crate::twitter::types::fixtures::user_json;
    use crate::twitter::types::{decode_user, ApiReply};
    use serde_json::{json, Value};

    fn user(body: Value) -> UserProfile {
        match decode_user(body).unwrap() {
            ApiReply::Ok(user) => user,
            ApiReply::Error(e) => panic!("unexpected error reply: {:?}", e),
        }
    }

    #[test]
    fn test_full_profile_line() {
        let line = format_user(&user(user_json()), "2013-12-14");
        assert_eq!(
            line,
            "[Twitter] Twitter Dev (@TwitterDev) \u{2714}\u{FE0F} | Internet | https://developer.twitter.com/ \
             | 1,648 friends, 513,958 followers | 3,634 tweets, 2,161 \u{2665}s | Joined: 2013-12-14 \
             | Your official source for Twitter Platform news https://twittercommunity.com"
        );
    }

    #[test]
    fn test_verified_without_optional_fields() {
        let body = json!({
            "name": "Bare",
            "screen_name": "bare",
            "verified": true,
            "protected": false,
            "friends_count": 1,
            "followers_count": 2,
            "statuses_count": 3,
            "favourites_count": 4,
            "created_at": "Sat Dec 14 04:35:55 +0000 2013"
        });
        let line = format_user(&user(body), "then");

        assert!(line.contains(VERIFIED_GLYPH));
        assert!(!line.contains(PROTECTED_GLYPH));
        assert_eq!(line.matches(" | ").count(), 2);
        assert!(line.ends_with("Joined: then"));
    }

    #[test]
    fn test_protected_and_empty_strings() {
        let mut body = user_json();
        body["verified"] = json!(false);
        body["protected"] = json!(true);
        body["location"] = json!("");
        body["url"] = Value::Null;
        body["description"] = json!("");
        let line = format_user(&user(body), "then");

        assert!(!line.contains(VERIFIED_GLYPH));
        assert!(line.contains(PROTECTED_GLYPH));
        assert!(line.starts_with("[Twitter] Twitter Dev (@TwitterDev) \u{1F512} | 1,648 friends"));
        assert!(line.ends_with("Joined: then"));
    }

    #[test]
    fn test_url_without_expansion_entity_is_kept() {
        let mut body = user_json();
        body["entities"]["url"] = json!({"urls": []});
        let line = format_user(&user(body), "then");
        assert!(line.contains(" | https://t.co/FGl7VOULyL | "));
    }

    #[test]
    fn test_long_bio_is_truncated_with_marker() {
        let mut body = user_json();
        body["description"] = json!("word ".repeat(200));
        let line = user_reply_line(&user(body), "then");
        assert!(line.ends_with(ELLIPSIS));
        assert!(line.len() <= MAX_MESSAGE_BYTES);
    }

    #[test]
    fn test_bio_line_breaks_are_folded() {
        let mut body = user_json();
        body["description"] = json!("line one\r\nPRIVMSG #x :injected\nhttps://t.co/xyz");
        body["location"] = json!("here\r\nthere");
        let line = user_reply_line(&user(body), "then");

        assert!(!line.contains(['\r', '\n']));
        assert!(line.contains(" | here \u{23CE} there | "));
        assert!(line.ends_with(&format!(
            "Joined: then | line one{}PRIVMSG #x :injected{}https://twittercommunity.com",
            LINE_BREAK, LINE_BREAK
        )));
    }
}

//! Link detection and routing.
//!
//! A chat message is scanned for Twitter links. Each link is resolved to
//! either a status lookup or a profile lookup and the resulting lines are
//! returned to the host in the order the links appeared.

use log::{debug, error, info};
use regex::Regex;
use std::sync::Arc;

use crate::config::TwitterConfig;
use crate::error::TwitterError;
use crate::text::{sendable_line, MAX_MESSAGE_BYTES};
use crate::timefmt::{format_time_for, TimePreferences};
use crate::twitter::{
    decode_tweet, decode_user, error_line, status_lines, user_reply_line, ApiReply, LookupKind,
    TwitterClient, MALFORMED_REPLY, UNREACHABLE_REPLY,
};

/// What a Twitter link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Status(String),
    Profile(String),
}

/// An incoming chat message and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Nick of the sender
    pub nick: String,
    /// Channel the message was sent to, or the nick for private messages
    pub sender: String,
    /// Raw message text
    pub text: String,
}

impl Trigger {
    pub fn new(nick: impl Into<String>, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Resolves one URL. Links under `/i/web/status/` are checked first because
/// the generic pattern would read them as a profile named `i`.
pub fn match_link(url: &str) -> Option<LinkTarget> {
    let web_status = Regex::new(r"^https?://twitter\.com/i/web/status/(?P<status>\d+)").ok()?;
    if let Some(caps) = web_status.captures(url) {
        return Some(LinkTarget::Status(caps["status"].to_string()));
    }

    let generic =
        Regex::new(r"^https?://twitter\.com/(?P<user>[^/?#]*)(?:/status/(?P<status>\d+))?").ok()?;
    let caps = generic.captures(url)?;

    if let Some(status) = caps.name("status") {
        return Some(LinkTarget::Status(status.as_str().to_string()));
    }
    match caps.name("user").map(|m| m.as_str()) {
        Some(user) if !user.is_empty() => Some(LinkTarget::Profile(user.to_string())),
        _ => None,
    }
}

/// Finds every Twitter link in a message, in order of appearance.
pub fn find_links(text: &str) -> Vec<LinkTarget> {
    let Ok(urls) = Regex::new(r"https?://\S+") else {
        return Vec::new();
    };

    urls.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '>', '\'', '"']))
        .filter_map(match_link)
        .collect()
}

/// The link previewer: configuration, API client and viewer preferences.
pub struct TwitterPlugin {
    config: TwitterConfig,
    client: TwitterClient,
    time: Arc<dyn TimePreferences>,
}

impl TwitterPlugin {
    pub fn new(config: TwitterConfig, time: Arc<dyn TimePreferences>) -> Self {
        let client = TwitterClient::new(&config);
        Self {
            config,
            client,
            time,
        }
    }

    /// Produces the reply lines for a chat message. Messages without a
    /// recognised link yield no lines.
    ///
    /// Every returned line is free of CR, LF and NUL and fits in
    /// [`MAX_MESSAGE_BYTES`], so the host can send each one as is.
    pub async fn handle(&self, trigger: &Trigger) -> Vec<String> {
        let mut lines = Vec::new();
        for target in find_links(&trigger.text) {
            info!("{} linked {:?} in {}", trigger.nick, target, trigger.sender);
            let reply = match &target {
                LinkTarget::Status(id) => self.output_status(trigger, id).await,
                LinkTarget::Profile(screen_name) => self.output_user(trigger, screen_name).await,
            };
            lines.extend(reply.iter().map(|line| sendable_line(line, MAX_MESSAGE_BYTES)));
        }
        lines
    }

    /// Lines for a status link.
    pub async fn output_status(&self, trigger: &Trigger, id: &str) -> Vec<String> {
        let reply = match self.client.fetch_status(id).await {
            Ok(body) => decode_tweet(body),
            Err(e) => Err(e),
        };

        match reply {
            Ok(ApiReply::Ok(tweet)) => status_lines(
                &tweet,
                self.config.show_quoted_tweets,
                self.config.quote_layout,
                |stamp| self.render_time(trigger, stamp),
            ),
            Ok(ApiReply::Error(entry)) => vec![error_line(&entry, LookupKind::Status, id)],
            Err(e) => vec![failure_line(&e, &format!("status ID {}", id))],
        }
    }

    /// Lines for a profile link.
    pub async fn output_user(&self, trigger: &Trigger, screen_name: &str) -> Vec<String> {
        let reply = match self.client.fetch_user(screen_name).await {
            Ok(body) => decode_user(body),
            Err(e) => Err(e),
        };

        match reply {
            Ok(ApiReply::Ok(user)) => {
                let joined = self.render_time(trigger, &user.created_at);
                vec![user_reply_line(&user, &joined)]
            }
            Ok(ApiReply::Error(entry)) => vec![error_line(&entry, LookupKind::User, screen_name)],
            Err(e) => vec![failure_line(&e, &format!("screen name {}", screen_name))],
        }
    }

    fn render_time(&self, trigger: &Trigger, stamp: &str) -> String {
        format_time_for(self.time.as_ref(), &trigger.nick, &trigger.sender, stamp)
    }
}

fn failure_line(err: &TwitterError, subject: &str) -> String {
    error!("Twitter lookup for {} failed: {}", subject, err);
    match err {
        TwitterError::Http(_) => UNREACHABLE_REPLY.to_string(),
        _ => {
            debug!("Reporting {} as malformed", subject);
            MALFORMED_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_status_link() {
        assert_eq!(
            match_link("https://twitter.com/i/web/status/1050118621198921728"),
            Some(LinkTarget::Status("1050118621198921728".to_string()))
        );
    }

    #[test]
    fn test_user_status_link_prefers_status() {
        assert_eq!(
            match_link("https://twitter.com/jack/status/20?s=21"),
            Some(LinkTarget::Status("20".to_string()))
        );
        assert_eq!(
            match_link("http://twitter.com/jack/status/20/photo/1"),
            Some(LinkTarget::Status("20".to_string()))
        );
    }

    #[test]
    fn test_profile_link() {
        assert_eq!(
            match_link("https://twitter.com/TwitterDev"),
            Some(LinkTarget::Profile("TwitterDev".to_string()))
        );
        assert_eq!(
            match_link("https://twitter.com/TwitterDev?lang=en"),
            Some(LinkTarget::Profile("TwitterDev".to_string()))
        );
        assert_eq!(
            match_link("https://twitter.com/TwitterDev/likes"),
            Some(LinkTarget::Profile("TwitterDev".to_string()))
        );
    }

    #[test]
    fn test_unusable_links_are_ignored() {
        assert_eq!(match_link("https://twitter.com/"), None);
        assert_eq!(match_link("https://example.com/jack/status/20"), None);
        assert_eq!(match_link("ftp://twitter.com/jack"), None);
    }

    #[test]
    fn test_find_links_in_message() {
        let links = find_links(
            "look (https://twitter.com/jack/status/20), and https://twitter.com/TwitterDev. also https://example.com",
        );
        assert_eq!(
            links,
            vec![
                LinkTarget::Status("20".to_string()),
                LinkTarget::Profile("TwitterDev".to_string())
            ]
        );
        assert!(find_links("no links here").is_empty());
    }
}

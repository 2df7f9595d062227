use serde::Deserialize;
use std::collections::HashMap;

/// Snapshot of a submission as returned by the API.
///
/// Deserialized once per fetch. `Post::update` replaces the whole value
/// with a fresh one; action methods patch the individual fields whose
/// new value they know.
#[derive(Deserialize, Debug, Clone)]
pub struct PostData {
    // Basic post information
    pub id: String,
    /// Fullname (`t3_` followed by the id); empty in responses that omit it.
    #[serde(default)]
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub domain: String,
    pub created_utc: f64,

    // Post type and content
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub selftext: String,
    pub selftext_html: Option<String>,

    // Post status
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub stickied: bool,
    #[serde(default)]
    pub contest_mode: bool,
    #[serde(default)]
    pub edited: serde_json::Value, // Can be boolean or timestamp

    // Flair information
    pub link_flair_text: Option<String>,
    pub link_flair_css_class: Option<String>,

    // Counters and display
    #[serde(default)]
    pub num_comments: i32,
    #[serde(default)]
    pub thumbnail: String,

    // Additional fields we don't explicitly model
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

impl PostData {
    /// Fullname used by the action endpoints (`t3_` + id).
    pub fn fullname(&self) -> String {
        if self.name.is_empty() {
            format!("t3_{}", self.id)
        } else {
            self.name.clone()
        }
    }

    /// Format a post for display with important metadata
    pub fn format_summary(&self) -> String {
        let mut content = format!(
            "Title: {}\nAuthor: u/{}\nSubreddit: r/{}\nComments: {}\n",
            self.title, self.author, self.subreddit, self.num_comments,
        );

        // Add post type indicators
        let mut flags = Vec::new();
        if self.is_self {
            flags.push("Self Post");
        }
        if self.over_18 {
            flags.push("NSFW");
        }
        if self.stickied {
            flags.push("Stickied");
        }
        if self.hidden {
            flags.push("Hidden");
        }
        if self.contest_mode {
            flags.push("Contest Mode");
        }
        if !flags.is_empty() {
            content.push_str(&format!("Flags: [{}]\n", flags.join(", ")));
        }

        // Add flair if available
        if let Some(flair) = &self.link_flair_text {
            if !flair.is_empty() {
                content.push_str(&format!("Flair: {}\n", flair));
            }
        }

        // For text posts, include the text (truncated if long)
        if self.is_self && !self.selftext.is_empty() {
            let text = if self.selftext.chars().count() > 500 {
                let mut excerpt = self.selftext.chars().take(500).collect::<String>();
                excerpt.push_str("...");
                excerpt
            } else {
                self.selftext.clone()
            };
            content.push_str("\nContent:\n---------\n");
            content.push_str(&text);
            content.push_str("\n---------\n");
        }

        // Add permalink and external links if different
        content.push_str(&format!(
            "\nPermalink: https://reddit.com{}",
            self.permalink
        ));
        if !self.is_self && !self.url.is_empty() {
            content.push_str(&format!("\nExternal URL: {}", self.url));
        }

        content
    }

    /// Get a short summary for the post (title, author, comment count)
    pub fn format_short_summary(&self) -> String {
        format!(
            "[r/{} | {} comments] {} - by u/{}",
            self.subreddit, self.num_comments, self.title, self.author
        )
    }

    /// Format the creation timestamp as a human-readable string
    pub fn format_timestamp(&self) -> String {
        use chrono::{TimeZone, Utc};

        let timestamp = Utc
            .timestamp_opt(self.created_utc as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PostData {
        serde_json::from_value(json!({
            "id": "abc123",
            "name": "t3_abc123",
            "title": "A modest proposal",
            "author": "swift",
            "subreddit": "programming",
            "permalink": "/r/programming/comments/abc123/a_modest_proposal/",
            "url": "https://example.com/essay",
            "domain": "example.com",
            "created_utc": 1700000000.0,
            "is_self": false,
            "selftext": "",
            "selftext_html": null,
            "over_18": false,
            "num_comments": 42,
            "thumbnail": "default",
            "link_flair_text": "Discussion",
            "link_flair_css_class": "discussion",
            "upvote_ratio": 0.97
        }))
        .unwrap()
    }

    #[test]
    fn decodes_core_fields() {
        let post = sample();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.fullname(), "t3_abc123");
        assert_eq!(post.num_comments, 42);
        assert_eq!(post.link_flair_text.as_deref(), Some("Discussion"));
        // Unmodeled fields land in the flattened map
        assert!(post.additional_fields.contains_key("upvote_ratio"));
    }

    #[test]
    fn fullname_falls_back_to_id() {
        let mut post = sample();
        post.name = String::new();
        assert_eq!(post.fullname(), "t3_abc123");
    }

    #[test]
    fn decodes_with_minimal_fields() {
        let post: PostData = serde_json::from_value(json!({
            "id": "xyz",
            "title": "bare",
            "created_utc": 1700000000.0
        }))
        .unwrap();
        assert_eq!(post.author, "");
        assert!(!post.is_self);
        assert!(post.link_flair_text.is_none());
        assert_eq!(post.fullname(), "t3_xyz");
    }

    #[test]
    fn summary_mentions_flags_and_flair() {
        let mut post = sample();
        post.over_18 = true;
        post.stickied = true;
        let summary = post.format_summary();
        assert!(summary.contains("NSFW"));
        assert!(summary.contains("Stickied"));
        assert!(summary.contains("Flair: Discussion"));
        assert!(summary.contains("External URL: https://example.com/essay"));
    }

    #[test]
    fn summary_includes_selftext_for_self_posts() {
        let mut post = sample();
        post.is_self = true;
        post.selftext = "hello world".to_string();
        let summary = post.format_summary();
        assert!(summary.contains("hello world"));
        assert!(!summary.contains("External URL"));
    }
}

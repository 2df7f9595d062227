use crate::client::{RedditClient, RedditError};
use crate::models::{Comment, CommentTreeNode, PostData};
use log::debug;

pub mod comments;

pub use comments::CommentStream;

/// A submission bound to the client that fetched it. The data fields are
/// a snapshot from load time; `update` re-fetches them, and the action
/// methods issue authenticated calls back to the API.
#[derive(Clone)]
pub struct Post {
    client: RedditClient,
    pub data: PostData,
}

impl Post {
    pub fn new(client: RedditClient, data: PostData) -> Self {
        Self { client, data }
    }

    /// Fullname of this post (`t3_` followed by the id).
    pub fn fullname(&self) -> String {
        self.data.fullname()
    }

    /// Re-fetch the post and replace the local snapshot with the
    /// server's current state.
    pub async fn update(&mut self) -> Result<(), RedditError> {
        debug!("Updating post {} from server", self.data.id);
        let data = self.client.fetch_post_data(&self.data.id).await?;
        self.data = data;
        Ok(())
    }

    /// Submit a top-level comment on this post.
    ///
    /// Requires a logged-in session with the 'submit' scope. Returns the
    /// created comment as the server echoed it back.
    pub async fn comment(&self, text: &str) -> Result<Comment, RedditError> {
        let fullname = self.fullname();
        debug!("Commenting on {}", fullname);

        let json = self
            .client
            .post_form(
                "/api/comment",
                &[
                    ("api_type", "json"),
                    ("text", text),
                    ("thing_id", fullname.as_str()),
                ],
            )
            .await?;

        let thing = json["json"]["data"]["things"]
            .as_array()
            .and_then(|things| things.first())
            .cloned()
            .ok_or_else(|| {
                RedditError::UnexpectedResponse(
                    "Comment response did not include the created comment".to_string(),
                )
            })?;

        let node: CommentTreeNode = serde_json::from_value(thing)?;
        match node.into_comment() {
            Some(comment) => {
                debug!("Created comment {} on {}", comment.id, fullname);
                Ok(comment)
            }
            None => Err(RedditError::UnexpectedResponse(
                "Comment response held a placeholder instead of a comment".to_string(),
            )),
        }
    }

    async fn simple_action(&self, path: &str) -> Result<(), RedditError> {
        let fullname = self.fullname();
        self.client
            .post_form(path, &[("id", fullname.as_str())])
            .await?;
        Ok(())
    }

    /// Hide this post from the logged-in user's listings. The local
    /// snapshot is not touched; call `update` to see the new state.
    pub async fn hide(&self) -> Result<(), RedditError> {
        debug!("Hiding post {}", self.data.id);
        self.simple_action("/api/hide").await
    }

    pub async fn unhide(&self) -> Result<(), RedditError> {
        debug!("Unhiding post {}", self.data.id);
        self.simple_action("/api/unhide").await
    }

    /// Mark this post as NSFW.
    pub async fn mark_nsfw(&self) -> Result<(), RedditError> {
        debug!("Marking post {} NSFW", self.data.id);
        self.simple_action("/api/marknsfw").await
    }

    pub async fn unmark_nsfw(&self) -> Result<(), RedditError> {
        debug!("Unmarking post {} NSFW", self.data.id);
        self.simple_action("/api/unmarknsfw").await
    }

    /// Delete this post. Only works on the logged-in user's own posts.
    pub async fn delete(&self) -> Result<(), RedditError> {
        debug!("Deleting post {}", self.data.id);
        self.simple_action("/api/del").await
    }

    /// Set the link flair on this post through the subreddit flair
    /// endpoint. Empty strings clear the flair. On success the local
    /// flair fields are updated to match what was submitted.
    pub async fn set_flair(&mut self, text: &str, css_class: &str) -> Result<(), RedditError> {
        let fullname = self.fullname();
        let path = format!("/r/{}/api/flair", self.data.subreddit);
        debug!("Setting flair on {} via {}", fullname, path);

        self.client
            .post_form(
                &path,
                &[
                    ("api_type", "json"),
                    ("css_class", css_class),
                    ("link", fullname.as_str()),
                    ("name", self.data.author.as_str()),
                    ("text", text),
                ],
            )
            .await?;

        self.data.link_flair_text = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self.data.link_flair_css_class = if css_class.is_empty() {
            None
        } else {
            Some(css_class.to_string())
        };
        Ok(())
    }

    /// Replace the self-text of this post. Only works on the logged-in
    /// user's own self-posts. The local snapshot keeps the new text.
    pub async fn edit_text(&mut self, text: &str) -> Result<(), RedditError> {
        let fullname = self.fullname();
        debug!("Editing text of {}", fullname);

        self.client
            .post_form(
                "/api/editusertext",
                &[
                    ("api_type", "json"),
                    ("text", text),
                    ("thing_id", fullname.as_str()),
                ],
            )
            .await?;

        self.data.selftext = text.to_string();
        Ok(())
    }

    /// Sticky or unsticky this post in its subreddit. Requires moderator
    /// rights there.
    pub async fn set_sticky(&self, state: bool) -> Result<(), RedditError> {
        let fullname = self.fullname();
        debug!("Setting sticky={} on {}", state, fullname);

        self.client
            .post_form(
                "/api/set_subreddit_sticky",
                &[
                    ("api_type", "json"),
                    ("id", fullname.as_str()),
                    ("state", if state { "true" } else { "false" }),
                ],
            )
            .await?;
        Ok(())
    }

    /// Turn contest mode on or off for this post's comment section.
    pub async fn set_contest_mode(&self, state: bool) -> Result<(), RedditError> {
        let fullname = self.fullname();
        debug!("Setting contest mode={} on {}", state, fullname);

        self.client
            .post_form(
                "/api/set_contest_mode",
                &[
                    ("api_type", "json"),
                    ("id", fullname.as_str()),
                    ("state", if state { "true" } else { "false" }),
                ],
            )
            .await?;
        Ok(())
    }

    /// Top-level comments of this post, placeholders dropped.
    pub async fn comments(&self, limit: u32) -> Result<Vec<Comment>, RedditError> {
        self.client.fetch_comments(&self.data.id, limit).await
    }

    /// Top-level comments with placeholders kept, one node per child the
    /// server returned.
    pub async fn comments_with_more(
        &self,
        limit: u32,
    ) -> Result<Vec<CommentTreeNode>, RedditError> {
        self.client
            .fetch_comments_with_more(&self.data.id, limit)
            .await
    }

    /// Walk every comment of this post lazily, expanding placeholders
    /// with follow-up requests as the caller pulls elements.
    pub fn comment_stream(&self, limit_per_request: u32) -> CommentStream {
        self.client.comment_stream(&self.data.id, limit_per_request)
    }
}

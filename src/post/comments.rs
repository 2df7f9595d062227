//! Comment tree retrieval: one-shot listing fetches plus a lazy walk
//! that expands "more" placeholders with follow-up requests.

use crate::client::{RedditClient, RedditError};
use crate::models::{Comment, CommentTreeNode, Listing};
use futures::stream::{self, Stream};
use log::debug;
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;

/// Placeholder expansion requests carry at most this many ids each.
const MORE_BATCH_LIMIT: usize = 100;

fn comments_path(post_id: &str, limit: u32) -> String {
    if limit > 0 {
        format!("/comments/{}.json?limit={}", post_id, limit)
    } else {
        format!("/comments/{}.json", post_id)
    }
}

fn morechildren_path(link_fullname: &str, children: &[String]) -> String {
    format!(
        "/api/morechildren.json?api_type=json&link_id={}&children={}",
        link_fullname,
        children.join(",")
    )
}

/// The comment endpoint answers with an array of listings; the comments
/// live in the last one.
fn decode_comment_listing(json: &serde_json::Value) -> Result<Vec<CommentTreeNode>, RedditError> {
    let last = json
        .as_array()
        .and_then(|parts| parts.last())
        .ok_or_else(|| {
            RedditError::UnexpectedResponse(
                "Comment response was not a non-empty array".to_string(),
            )
        })?;

    let listing: Listing<CommentTreeNode> = serde_json::from_value(last.clone())?;
    Ok(listing.data.children)
}

fn strip_post_prefix(post_id: &str) -> &str {
    post_id.strip_prefix("t3_").unwrap_or(post_id)
}

impl RedditClient {
    /// Fetch a post's top-level comments, dropping placeholder nodes so
    /// the result is comments only. A `limit` of 0 leaves the page size
    /// to the server. Order matches the server response.
    pub async fn fetch_comments(
        &self,
        post_id: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, RedditError> {
        let nodes = self.fetch_comments_with_more(post_id, limit).await?;
        Ok(nodes
            .into_iter()
            .filter_map(CommentTreeNode::into_comment)
            .collect())
    }

    /// Same fetch as `fetch_comments`, but placeholders stay in the
    /// result. One node comes back per child the server sent.
    pub async fn fetch_comments_with_more(
        &self,
        post_id: &str,
        limit: u32,
    ) -> Result<Vec<CommentTreeNode>, RedditError> {
        let post_id = strip_post_prefix(post_id);
        let json = self.get_json(&comments_path(post_id, limit)).await?;
        let nodes = decode_comment_listing(&json)?;
        debug!("Fetched {} comment nodes for post {}", nodes.len(), post_id);
        Ok(nodes)
    }

    /// Start a lazy walk over every comment on a post. Each walk begins
    /// again from the top-level listing; it does not resume an earlier
    /// one.
    pub fn comment_stream(&self, post_id: &str, limit_per_request: u32) -> CommentStream {
        CommentStream::new(self.clone(), post_id, limit_per_request)
    }
}

/// Pull-based walk over a post's comments. Each `next` call either hands
/// out a buffered comment or performs one network request to refill the
/// buffer, so consumption drives the paging.
///
/// Placeholders found along the way queue their child ids; those are
/// expanded in request order once the buffered comments run out. A
/// failed request ends the walk at that element, leaving everything
/// already yielded valid.
pub struct CommentStream {
    client: RedditClient,
    post_id: String,
    limit: u32,
    started: bool,
    done: bool,
    buffered: VecDeque<Comment>,
    pending: VecDeque<Vec<String>>,
    cancel: CancellationToken,
}

impl CommentStream {
    fn new(client: RedditClient, post_id: &str, limit: u32) -> Self {
        Self {
            client,
            post_id: strip_post_prefix(post_id).to_string(),
            limit,
            started: false,
            done: false,
            buffered: VecDeque::new(),
            pending: VecDeque::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Token observed before every element. Cancelling it stops the
    /// walk before the next network call; a call already in flight is
    /// not interrupted.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Produce the next comment, fetching another page or placeholder
    /// batch when the buffer is empty. Returns `None` once the walk is
    /// exhausted, cancelled, or already failed.
    pub async fn next(&mut self) -> Option<Result<Comment, RedditError>> {
        loop {
            if self.done || self.cancel.is_cancelled() {
                self.done = true;
                return None;
            }

            if let Some(comment) = self.buffered.pop_front() {
                return Some(Ok(comment));
            }

            let refill = if !self.started {
                self.started = true;
                self.fetch_first_page().await
            } else if let Some(batch) = self.pending.pop_front() {
                self.fetch_more_batch(batch).await
            } else {
                self.done = true;
                return None;
            };

            if let Err(err) = refill {
                self.done = true;
                return Some(Err(err));
            }
            // A refill may have yielded nothing (placeholder with no
            // retrievable children); loop to the next batch or finish.
        }
    }

    async fn fetch_first_page(&mut self) -> Result<(), RedditError> {
        debug!("Starting comment walk for post {}", self.post_id);
        let json = self
            .client
            .get_json(&comments_path(&self.post_id, self.limit))
            .await?;
        let nodes = decode_comment_listing(&json)?;
        self.absorb(nodes);
        Ok(())
    }

    async fn fetch_more_batch(&mut self, batch: Vec<String>) -> Result<(), RedditError> {
        let link_fullname = format!("t3_{}", self.post_id);
        debug!(
            "Expanding {} deferred comment ids for {}",
            batch.len(),
            link_fullname
        );

        let json = self
            .client
            .get_json(&morechildren_path(&link_fullname, &batch))
            .await?;
        RedditClient::check_api_errors(&json)?;

        let things = json["json"]["data"]["things"].clone();
        let nodes: Vec<CommentTreeNode> = serde_json::from_value(things)?;
        self.absorb(nodes);
        Ok(())
    }

    /// File a batch of nodes: comments go to the buffer, placeholder
    /// children queue up for later expansion requests.
    fn absorb(&mut self, nodes: Vec<CommentTreeNode>) {
        for node in nodes {
            match node {
                CommentTreeNode::Comment(comment) => self.buffered.push_back(comment),
                CommentTreeNode::More(more) => {
                    for chunk in more.children.chunks(MORE_BATCH_LIMIT) {
                        if !chunk.is_empty() {
                            self.pending.push_back(chunk.to_vec());
                        }
                    }
                }
            }
        }
    }

    /// Adapt the walk into a `futures` stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<Comment, RedditError>> {
        stream::unfold(self, |mut walk| async move {
            walk.next().await.map(|item| (item, walk))
        })
    }
}

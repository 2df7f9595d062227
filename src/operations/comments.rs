use crate::client::{RedditClient, RedditError};
use crate::models::{Comment, CommentTreeNode};
use log::{error, info};

/// Configuration options for fetching a post's comments
#[derive(Debug, Clone)]
pub struct CommentsOptions {
    /// The id of the post whose comments to fetch
    pub post_id: String,
    /// Comments per request; 0 uses the server default
    pub limit: u32,
    /// Keep "more comments" placeholders in the listing
    pub with_more: bool,
    /// Walk the whole comment section, expanding placeholders
    pub all: bool,
}

/// Result of a comments fetch operation
#[derive(Debug)]
pub struct CommentsResult {
    /// Number of top-level comments in the output
    pub comment_count: usize,
    /// Number of top-level placeholder markers in the output
    pub more_count: usize,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
}

/// Operation for fetching and displaying a post's comment tree
pub struct CommentsOperation {
    /// Configuration options for the operation
    options: CommentsOptions,
    /// Reddit client for API interactions
    client: RedditClient,
}

impl CommentsOperation {
    /// Create a new comments operation with the provided options
    pub fn new(options: CommentsOptions) -> Self {
        let client = RedditClient::new();
        Self { options, client }
    }

    /// Create a new comments operation with a custom Reddit client
    pub fn with_client(options: CommentsOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    /// Execute the comments operation
    pub async fn execute(&self) -> Result<CommentsResult, RedditError> {
        if self.options.all {
            return self.execute_walk().await;
        }

        info!("Fetching comments for post {}", self.options.post_id);

        let nodes = self
            .client
            .fetch_comments_with_more(&self.options.post_id, self.options.limit)
            .await?;

        let comment_count = nodes.iter().filter(|n| !n.is_more()).count();
        let more_count = nodes.len() - comment_count;

        let mut output = String::new();
        if nodes.is_empty() {
            output.push_str("No comments found.\n");
        } else {
            output.push_str(&format!("Found {} comments\n", comment_count));
            if self.options.with_more && more_count > 0 {
                output.push_str(&format!("({} reply markers not yet fetched)\n", more_count));
            }
            for node in &nodes {
                render_node(node, 0, self.options.with_more, &mut output);
            }
        }

        Ok(CommentsResult {
            comment_count,
            more_count,
            formatted_output: output,
        })
    }

    /// Walk every comment with the lazy stream, expanding placeholders
    /// with follow-up requests as needed.
    async fn execute_walk(&self) -> Result<CommentsResult, RedditError> {
        info!("Walking every comment of post {}", self.options.post_id);

        let mut walk = self
            .client
            .comment_stream(&self.options.post_id, self.options.limit);

        let mut comments = Vec::new();
        while let Some(item) = walk.next().await {
            comments.push(item?);
        }

        let mut output = String::new();
        if comments.is_empty() {
            output.push_str("No comments found.\n");
        } else {
            output.push_str(&format!("Found {} comments\n", comments.len()));
            for comment in &comments {
                render_comment(comment, 0, self.options.with_more, &mut output);
            }
        }

        Ok(CommentsResult {
            comment_count: comments.len(),
            more_count: 0,
            formatted_output: output,
        })
    }
}

fn render_node(node: &CommentTreeNode, depth: usize, show_more: bool, output: &mut String) {
    match node {
        CommentTreeNode::Comment(comment) => render_comment(comment, depth, show_more, output),
        CommentTreeNode::More(more) => {
            if show_more {
                output.push_str(&format!(
                    "{}[+] {} more replies\n",
                    "  ".repeat(depth),
                    more.count
                ));
            }
        }
    }
}

fn render_comment(comment: &Comment, depth: usize, show_more: bool, output: &mut String) {
    let indent = "  ".repeat(depth);

    // One line per comment: body flattened and truncated, safely handling UTF-8
    let body = comment.body.replace('\n', " ");
    let body = if body.chars().count() > 80 {
        let mut excerpt = body.chars().take(77).collect::<String>();
        excerpt.push_str("...");
        excerpt
    } else {
        body
    };

    output.push_str(&format!("{}u/{}: {}\n", indent, comment.author, body));

    for reply in &comment.replies {
        render_node(reply, depth + 1, show_more, output);
    }
}

/// CLI handler function for comments command that accepts a preconfigured client
pub async fn handle_comments_command_with_client(
    post_id: String,
    limit: u32,
    with_more: bool,
    all: bool,
    client: RedditClient,
) -> Result<(), RedditError> {
    let options = CommentsOptions {
        post_id,
        limit,
        with_more,
        all,
    };

    let operation = CommentsOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching comments: {:?}", err);
            Err(err)
        }
    }
}

use crate::client::{RedditClient, RedditError};
use log::{error, info};

/// Configuration options for creating a comment on a post
#[derive(Debug, Clone)]
pub struct CommentOptions {
    /// The id of the post to comment on (with or without the t3_ prefix)
    pub post_id: String,
    /// Text content of the comment
    pub text: String,
}

/// Result of a comment creation operation
#[derive(Debug)]
pub struct CommentResult {
    /// Whether the comment was successfully created
    pub success: bool,
    /// URL of the created comment (if successful)
    pub comment_url: Option<String>,
    /// Formatted message for CLI output
    pub message: String,
}

/// Operation for creating a comment on a post
pub struct CommentOperation {
    /// Configuration options for the operation
    options: CommentOptions,
    /// Reddit client for API interactions
    client: RedditClient,
}

impl CommentOperation {
    /// Create a new comment operation with the provided options
    pub fn new(options: CommentOptions) -> Self {
        let client = RedditClient::new();
        Self { options, client }
    }

    /// Create a new comment operation with a custom Reddit client
    pub fn with_client(options: CommentOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    /// Execute the comment creation operation
    pub async fn execute(&self) -> Result<CommentResult, RedditError> {
        info!("Creating a new comment on post: {}", self.options.post_id);

        let post = self.client.post(&self.options.post_id).await?;

        match post.comment(&self.options.text).await {
            Ok(comment) => {
                let url = match &comment.permalink {
                    Some(permalink) => format!("https://reddit.com{}", permalink),
                    None => comment.fullname(),
                };
                let message = format!("Comment created successfully! URL or ID: {}", url);

                Ok(CommentResult {
                    success: true,
                    comment_url: Some(url),
                    message,
                })
            }
            Err(err) => {
                let message = format!(
                    "Error creating comment: {}\n\nNote: Commenting requires a logged-in session with the 'submit' scope.",
                    err
                );

                Ok(CommentResult {
                    success: false,
                    comment_url: None,
                    message,
                })
            }
        }
    }
}

/// CLI handler function for comment command with client
pub async fn handle_comment_command_with_client(
    post_id: String,
    text: String,
    client: RedditClient,
) -> Result<(), RedditError> {
    let options = CommentOptions { post_id, text };

    let operation = CommentOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            if result.success {
                println!("{}", result.message);
            } else {
                eprintln!("{}", result.message);
            }
            Ok(())
        }
        Err(err) => {
            error!("Error executing comment operation: {:?}", err);
            Err(err)
        }
    }
}

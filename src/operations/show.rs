use crate::client::{RedditClient, RedditError};
use crate::models::PostData;
use log::{error, info};

/// Configuration options for showing a post
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// The id of the post to fetch (with or without the t3_ prefix)
    pub post_id: String,
}

/// Result of a show operation
#[derive(Debug)]
pub struct ShowResult {
    /// Formatted output (for CLI display)
    pub formatted_output: String,
    /// The fetched post data
    pub post: PostData,
}

/// Operation for fetching and displaying a single post
pub struct ShowOperation {
    /// Configuration options for the operation
    options: ShowOptions,
    /// Reddit client for API interactions
    client: RedditClient,
}

impl ShowOperation {
    /// Create a new show operation with the provided options
    pub fn new(options: ShowOptions) -> Self {
        let client = RedditClient::new();
        Self { options, client }
    }

    /// Create a new show operation with a custom Reddit client
    pub fn with_client(options: ShowOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    /// Execute the show operation
    pub async fn execute(&self) -> Result<ShowResult, RedditError> {
        info!("Fetching post {}", self.options.post_id);

        let post = self.client.post(&self.options.post_id).await?;

        let mut output = String::new();
        output.push_str("\n============ POST =============\n");
        output.push_str(&format!("[{}]\n", post.data.format_timestamp()));
        output.push_str(&format!(
            "Thing ID: {} (use this for commenting)\n",
            post.fullname()
        ));
        output.push_str(&post.data.format_summary());
        output.push_str("\n================================\n");

        Ok(ShowResult {
            formatted_output: output,
            post: post.data,
        })
    }
}

/// CLI handler function for show command that accepts a preconfigured client
pub async fn handle_show_command_with_client(
    post_id: String,
    client: RedditClient,
) -> Result<(), RedditError> {
    let options = ShowOptions { post_id };

    let operation = ShowOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching post: {:?}", err);
            Err(err)
        }
    }
}

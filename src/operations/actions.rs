use crate::client::{RedditClient, RedditError};
use log::{error, info};

/// A state-changing action that can be applied to a post.
#[derive(Debug, Clone)]
pub enum PostAction {
    Hide,
    Unhide,
    MarkNsfw,
    UnmarkNsfw,
    Flair { text: String, css_class: String },
    Edit { text: String },
    Sticky { state: bool },
    ContestMode { state: bool },
    Delete,
}

impl PostAction {
    /// Short description used in log and CLI output.
    pub fn describe(&self) -> String {
        match self {
            PostAction::Hide => "hide".to_string(),
            PostAction::Unhide => "unhide".to_string(),
            PostAction::MarkNsfw => "mark NSFW".to_string(),
            PostAction::UnmarkNsfw => "unmark NSFW".to_string(),
            PostAction::Flair { text, .. } => format!("set flair to \"{}\"", text),
            PostAction::Edit { .. } => "edit text".to_string(),
            PostAction::Sticky { state: true } => "sticky".to_string(),
            PostAction::Sticky { state: false } => "unsticky".to_string(),
            PostAction::ContestMode { state: true } => "enable contest mode".to_string(),
            PostAction::ContestMode { state: false } => "disable contest mode".to_string(),
            PostAction::Delete => "delete".to_string(),
        }
    }
}

/// Configuration options for applying an action to a post
#[derive(Debug, Clone)]
pub struct ActionOptions {
    /// The id of the post to act on (with or without the t3_ prefix)
    pub post_id: String,
    /// The action to apply
    pub action: PostAction,
}

/// Result of a post action operation
#[derive(Debug)]
pub struct ActionResult {
    /// Whether the action was applied
    pub success: bool,
    /// Formatted message for CLI output
    pub message: String,
}

/// Operation for applying a state-changing action to a post
pub struct ActionOperation {
    /// Configuration options for the operation
    options: ActionOptions,
    /// Reddit client for API interactions
    client: RedditClient,
}

impl ActionOperation {
    /// Create a new action operation with the provided options
    pub fn new(options: ActionOptions) -> Self {
        let client = RedditClient::new();
        Self { options, client }
    }

    /// Create a new action operation with a custom Reddit client
    pub fn with_client(options: ActionOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    /// Execute the action against the post
    pub async fn execute(&self) -> Result<ActionResult, RedditError> {
        info!(
            "Applying \"{}\" to post {}",
            self.options.action.describe(),
            self.options.post_id
        );

        let mut post = self.client.post(&self.options.post_id).await?;

        let outcome = match &self.options.action {
            PostAction::Hide => post.hide().await,
            PostAction::Unhide => post.unhide().await,
            PostAction::MarkNsfw => post.mark_nsfw().await,
            PostAction::UnmarkNsfw => post.unmark_nsfw().await,
            PostAction::Flair { text, css_class } => post.set_flair(text, css_class).await,
            PostAction::Edit { text } => post.edit_text(text).await,
            PostAction::Sticky { state } => post.set_sticky(*state).await,
            PostAction::ContestMode { state } => post.set_contest_mode(*state).await,
            PostAction::Delete => post.delete().await,
        };

        match outcome {
            Ok(()) => Ok(ActionResult {
                success: true,
                message: format!(
                    "Applied \"{}\" to {}",
                    self.options.action.describe(),
                    post.fullname()
                ),
            }),
            Err(err) => Ok(ActionResult {
                success: false,
                message: format!(
                    "Error applying \"{}\" to {}: {}",
                    self.options.action.describe(),
                    post.fullname(),
                    err
                ),
            }),
        }
    }
}

/// CLI handler function for post actions that accepts a preconfigured client
pub async fn handle_action_command_with_client(
    post_id: String,
    action: PostAction,
    client: RedditClient,
) -> Result<(), RedditError> {
    let options = ActionOptions { post_id, action };

    let operation = ActionOperation::with_client(options, client);
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
            error!("Error executing post action: {:?}", err);
            Err(err)
        }
    }
}

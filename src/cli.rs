use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "redlink",
    version = "0.1",
    about = "Rust client for Reddit submissions and their comment trees."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Command to fetch a post and show its details.
    Show {
        /// The id of the post to fetch.
        #[arg(help = "Post id (with or without the t3_ prefix)", required = true)]
        post_id: String,
    },

    /// Command to fetch the comments of a post.
    Comments {
        /// The id of the post whose comments to fetch.
        #[arg(help = "Post id (with or without the t3_ prefix)", required = true)]
        post_id: String,

        /// How many comments to request per call. 0 uses the server default.
        #[arg(long, short, help = "Comments per request (0 = server default)", default_value_t = 0)]
        limit: u32,

        /// Keep "more comments" placeholders in the listing instead of
        /// dropping them.
        #[arg(long, help = "Show placeholder markers for unfetched replies")]
        with_more: bool,

        /// Walk the whole comment section, expanding placeholders with
        /// follow-up requests.
        #[arg(long, help = "Fetch every comment, page by page")]
        all: bool,
    },

    /// Command to submit a comment on a post.
    /// Requires a logged-in session (REDDIT_ACCESS_TOKEN).
    Comment {
        /// The id of the post to comment on.
        #[arg(help = "Post id (with or without the t3_ prefix)", required = true)]
        post_id: String,

        /// Text content of the comment.
        #[arg(help = "Comment text content", required = true)]
        text: String,
    },

    /// Hide a post from your listings.
    Hide {
        /// The id of the post to hide.
        #[arg(help = "Post id", required = true)]
        post_id: String,
    },

    /// Undo a previous hide.
    Unhide {
        /// The id of the post to unhide.
        #[arg(help = "Post id", required = true)]
        post_id: String,
    },

    /// Mark a post as NSFW.
    MarkNsfw {
        /// The id of the post to mark.
        #[arg(help = "Post id", required = true)]
        post_id: String,
    },

    /// Remove the NSFW marker from a post.
    UnmarkNsfw {
        /// The id of the post to unmark.
        #[arg(help = "Post id", required = true)]
        post_id: String,
    },

    /// Set the link flair on a post.
    Flair {
        /// The id of the post to flair.
        #[arg(help = "Post id", required = true)]
        post_id: String,

        /// Flair text. An empty string clears the flair.
        #[arg(help = "Flair text", required = true)]
        text: String,

        /// CSS class for the flair.
        #[arg(long, help = "Flair CSS class", default_value = "")]
        css_class: String,
    },

    /// Replace the self-text of one of your posts.
    Edit {
        /// The id of the post to edit.
        #[arg(help = "Post id", required = true)]
        post_id: String,

        /// The new text content.
        #[arg(help = "New post text content", required = true)]
        text: String,
    },

    /// Sticky a post in its subreddit (moderators only).
    Sticky {
        /// The id of the post to sticky.
        #[arg(help = "Post id", required = true)]
        post_id: String,

        /// Unsticky instead of sticky.
        #[arg(long, help = "Remove the sticky instead of setting it")]
        undo: bool,
    },

    /// Put a post's comment section in contest mode (moderators only).
    Contest {
        /// The id of the post to change.
        #[arg(help = "Post id", required = true)]
        post_id: String,

        /// Turn contest mode off instead of on.
        #[arg(long, help = "Disable contest mode instead of enabling it")]
        undo: bool,
    },

    /// Delete one of your own posts.
    Delete {
        /// The id of the post to delete.
        #[arg(help = "Post id", required = true)]
        post_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn comments_flags_parse() {
        let cli = Cli::try_parse_from(["redlink", "comments", "abc123", "--limit", "25", "--all"])
            .unwrap();

        match cli.command {
            Commands::Comments {
                post_id,
                limit,
                with_more,
                all,
            } => {
                assert_eq!(post_id, "abc123");
                assert_eq!(limit, 25);
                assert!(!with_more);
                assert!(all);
            }
            other => panic!("parsed into the wrong command: {:?}", other),
        }
    }

    #[test]
    fn flair_css_class_defaults_to_empty() {
        let cli = Cli::try_parse_from(["redlink", "flair", "abc123", "Landscape"]).unwrap();

        match cli.command {
            Commands::Flair { css_class, .. } => assert_eq!(css_class, ""),
            other => panic!("parsed into the wrong command: {:?}", other),
        }
    }
}

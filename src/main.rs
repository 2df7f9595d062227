use clap::Parser;
use log::error;
use redlink::cli::{Cli, Commands};
use redlink::config::AppConfig;
use redlink::operations::actions::{handle_action_command_with_client, PostAction};
use redlink::operations::comment::handle_comment_command_with_client;
use redlink::operations::comments::handle_comments_command_with_client;
use redlink::operations::show::handle_show_command_with_client;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = AppConfig::load();
    let client = config.create_client();

    let result = match cli.command {
        Commands::Show { post_id } => handle_show_command_with_client(post_id, client).await,
        Commands::Comments {
            post_id,
            limit,
            with_more,
            all,
        } => handle_comments_command_with_client(post_id, limit, with_more, all, client).await,
        Commands::Comment { post_id, text } => {
            handle_comment_command_with_client(post_id, text, client).await
        }
        Commands::Hide { post_id } => {
            handle_action_command_with_client(post_id, PostAction::Hide, client).await
        }
        Commands::Unhide { post_id } => {
            handle_action_command_with_client(post_id, PostAction::Unhide, client).await
        }
        Commands::MarkNsfw { post_id } => {
            handle_action_command_with_client(post_id, PostAction::MarkNsfw, client).await
        }
        Commands::UnmarkNsfw { post_id } => {
            handle_action_command_with_client(post_id, PostAction::UnmarkNsfw, client).await
        }
        Commands::Flair {
            post_id,
            text,
            css_class,
        } => {
            handle_action_command_with_client(
                post_id,
                PostAction::Flair { text, css_class },
                client,
            )
            .await
        }
        Commands::Edit { post_id, text } => {
            handle_action_command_with_client(post_id, PostAction::Edit { text }, client).await
        }
        Commands::Sticky { post_id, undo } => {
            handle_action_command_with_client(post_id, PostAction::Sticky { state: !undo }, client)
                .await
        }
        Commands::Contest { post_id, undo } => {
            handle_action_command_with_client(
                post_id,
                PostAction::ContestMode { state: !undo },
                client,
            )
            .await
        }
        Commands::Delete { post_id } => {
            handle_action_command_with_client(post_id, PostAction::Delete, client).await
        }
    };

    if let Err(err) = result {
        error!("Command failed: {}", err);
        std::process::exit(1);
    }
}

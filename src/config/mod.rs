//! Configuration module for handling environment variables and .env files

use crate::client::RedditClient;
use dotenv::dotenv;
use log::info;
use std::env;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,

    // Session credentials (if provided directly)
    pub access_token: Option<String>,
    pub modhash: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::client::DEFAULT_USER_AGENT.to_string(),
            access_token: None,
            modhash: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => info!("Loaded environment from .env file"),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        let mut config = Self::default();

        // User agent - use environment variable if available, otherwise use default
        if let Ok(user_agent) = env::var("REDDIT_USER_AGENT") {
            config.user_agent = user_agent;
        }

        // Session credentials
        if let Ok(access_token) = env::var("REDDIT_ACCESS_TOKEN") {
            config.access_token = Some(access_token);
        }

        if let Ok(modhash) = env::var("REDDIT_MODHASH") {
            config.modhash = Some(modhash);
        }

        config
    }

    /// Create a RedditClient from this configuration
    pub fn create_client(&self) -> RedditClient {
        RedditClient::from_config(self)
    }
}

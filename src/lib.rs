//! Rust client for Reddit submissions and their comment trees.
//!
//! The entry points are [`RedditClient`] for talking to the API and
//! [`Post`] for acting on a fetched submission: commenting, hiding,
//! flairing, editing, and walking its comment tree either as one-shot
//! listings or as a lazy, placeholder-expanding stream.

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod operations;
pub mod post;

pub use client::{ApiError, RedditClient, RedditError};
pub use post::{CommentStream, Post};

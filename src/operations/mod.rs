//! Operations module provides functionality for interacting with Reddit

pub mod actions;
pub mod comment;
pub mod comments;
pub mod show;

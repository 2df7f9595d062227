use serde::Deserialize;

pub mod comment;
pub mod post;

pub use comment::{Comment, CommentTreeNode, MoreComments};
pub use post::PostData;

// Shared envelopes used by every listing endpoint

/// Kind/data envelope wrapping each object the API returns.
///
/// Reddit tags objects with a kind string: `t1` for comments, `t3` for
/// submissions, `more` for deferred-children placeholders, and so on.
/// The payload under `data` depends on the kind.
#[derive(Deserialize, Debug, Clone)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

/// Top-level response for Reddit listings
#[derive(Deserialize, Debug, Clone)]
pub struct Listing<T> {
    pub kind: String,
    pub data: ListingData<T>,
}

/// Collection body of a listing: pagination anchors plus children
#[derive(Deserialize, Debug, Clone)]
pub struct ListingData<T> {
    pub after: Option<String>,
    pub before: Option<String>,
    // dist and modhash can be null in comment listings
    #[serde(default)]
    pub dist: Option<i32>,
    #[serde(default)]
    pub modhash: Option<String>,
    #[serde(default)]
    pub geo_filter: Option<String>,
    pub children: Vec<T>,
}

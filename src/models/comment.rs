use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::models::Listing;

/// One node of a comment tree: a comment, or a placeholder standing in
/// for replies the server left out of the response.
///
/// Comment listings only ever carry these two kinds. Anything else is a
/// decode error, not a silently admitted stranger.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", content = "data")]
pub enum CommentTreeNode {
    /// A fetched comment (`kind == "t1"`).
    #[serde(rename = "t1")]
    Comment(Comment),
    /// Deferred children the server did not include (`kind == "more"`).
    #[serde(rename = "more")]
    More(MoreComments),
}

impl CommentTreeNode {
    /// The comment inside this node, if it is one.
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            CommentTreeNode::Comment(comment) => Some(comment),
            CommentTreeNode::More(_) => None,
        }
    }

    /// Consume the node, keeping only comments.
    pub fn into_comment(self) -> Option<Comment> {
        match self {
            CommentTreeNode::Comment(comment) => Some(comment),
            CommentTreeNode::More(_) => None,
        }
    }

    /// True for placeholder nodes.
    pub fn is_more(&self) -> bool {
        matches!(self, CommentTreeNode::More(_))
    }
}

/// A comment attached to a post or to another comment.
#[derive(Deserialize, Debug, Clone)]
pub struct Comment {
    pub id: String,
    /// Fullname (`t1_` followed by the id); empty in responses that omit it.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    pub body_html: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    /// Fullname of the direct parent: `t3_...` for top-level comments,
    /// `t1_...` for replies.
    #[serde(default)]
    pub parent_id: String,
    /// Fullname of the post this comment belongs to. Identifier only;
    /// the post is not kept alive or reachable through it.
    #[serde(default)]
    pub link_id: String,
    #[serde(default)]
    pub created_utc: f64,
    /// Nested replies. The API sends `""` instead of a listing when
    /// there are none.
    #[serde(default, deserialize_with = "replies_listing")]
    pub replies: Vec<CommentTreeNode>,

    // Additional fields we don't explicitly model
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}

impl Comment {
    /// Fullname used in parent references (`t1_` + id).
    pub fn fullname(&self) -> String {
        if self.name.is_empty() {
            format!("t1_{}", self.id)
        } else {
            self.name.clone()
        }
    }

    /// Direct replies that are comments; placeholders are skipped.
    pub fn reply_comments(&self) -> impl Iterator<Item = &Comment> {
        self.replies.iter().filter_map(CommentTreeNode::as_comment)
    }
}

/// Placeholder for replies that were not part of the response.
#[derive(Deserialize, Debug, Clone)]
pub struct MoreComments {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Number of deferred descendants reported by the server.
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub depth: u32,
    /// Ids of the not-yet-fetched children.
    #[serde(default)]
    pub children: Vec<String>,
}

/// Decode the `replies` field, which is either an empty string or a
/// full listing of nodes.
fn replies_listing<'de, D>(deserializer: D) -> Result<Vec<CommentTreeNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null | serde_json::Value::String(_) => Ok(Vec::new()),
        other => {
            let listing: Listing<CommentTreeNode> =
                serde_json::from_value(other).map_err(serde::de::Error::custom)?;
            Ok(listing.data.children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_comment(id: &str) -> String {
        format!(
            r#"{{"kind": "t1", "data": {{"id": "{}", "name": "t1_{}", "author": "someone",
                "body": "reply body", "body_html": null, "parent_id": "t3_abc123",
                "link_id": "t3_abc123", "created_utc": 1700000000.0, "replies": ""}}}}"#,
            id, id
        )
    }

    #[test]
    fn decodes_comment_with_empty_replies() {
        let node: CommentTreeNode = serde_json::from_str(&leaf_comment("c1")).unwrap();
        let comment = node.as_comment().expect("should be a comment");
        assert_eq!(comment.id, "c1");
        assert_eq!(comment.fullname(), "t1_c1");
        assert_eq!(comment.link_id, "t3_abc123");
        assert!(comment.replies.is_empty());
    }

    #[test]
    fn decodes_nested_replies_listing() {
        let body = format!(
            r#"{{"kind": "t1", "data": {{"id": "c1", "author": "op", "body": "top",
                "body_html": null, "parent_id": "t3_abc123", "link_id": "t3_abc123",
                "created_utc": 1700000000.0,
                "replies": {{"kind": "Listing", "data": {{"after": null, "before": null,
                    "children": [{}, {{"kind": "more", "data": {{"id": "m1", "name": "t1_m1",
                        "count": 7, "parent_id": "t1_c1", "depth": 1,
                        "children": ["d1", "d2"]}}}}]}}}}}}}}"#,
            leaf_comment("c2")
        );

        let node: CommentTreeNode = serde_json::from_str(&body).unwrap();
        let comment = node.into_comment().expect("should be a comment");
        assert_eq!(comment.replies.len(), 2);
        assert_eq!(comment.reply_comments().count(), 1);
        match &comment.replies[1] {
            CommentTreeNode::More(more) => {
                assert_eq!(more.count, 7);
                assert_eq!(more.children, vec!["d1", "d2"]);
            }
            CommentTreeNode::Comment(_) => panic!("expected a placeholder"),
        }
    }

    #[test]
    fn decodes_more_node() {
        let body = r#"{"kind": "more", "data": {"id": "m9", "name": "t1_m9", "count": 120,
            "parent_id": "t3_abc123", "depth": 0, "children": ["x1", "x2", "x3"]}}"#;
        let node: CommentTreeNode = serde_json::from_str(body).unwrap();
        assert!(node.is_more());
        assert!(node.as_comment().is_none());
    }

    #[test]
    fn unrecognized_kind_fails_decoding() {
        let body = r#"{"kind": "t5", "data": {"display_name": "programming"}}"#;
        let result = serde_json::from_str::<CommentTreeNode>(body);
        let err = result.expect_err("t5 must not decode as a tree node");
        assert!(err.to_string().contains("t5"));
    }

    #[test]
    fn mixed_children_keep_their_kinds() {
        let body = format!(
            r#"[{}, {{"kind": "more", "data": {{"id": "m1", "count": 3,
                "parent_id": "t3_abc123", "children": ["y1"]}}}}, {}]"#,
            leaf_comment("c1"),
            leaf_comment("c2")
        );
        let nodes: Vec<CommentTreeNode> = serde_json::from_str(&body).unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(!nodes[0].is_more());
        assert!(nodes[1].is_more());
        assert!(!nodes[2].is_more());
    }
}

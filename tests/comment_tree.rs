use futures::StreamExt;
use redlink::RedditClient;

fn post_listing_json() -> &'static str {
    r#"{"kind": "Listing", "data": {"after": null, "before": null, "children": [
        {"kind": "t3", "data": {
            "id": "w1xyz",
            "name": "t3_w1xyz",
            "title": "Show HN: a Reddit client in Rust",
            "author": "builder",
            "subreddit": "rust",
            "permalink": "/r/rust/comments/w1xyz/show_hn/",
            "url": "https://www.reddit.com/r/rust/comments/w1xyz/show_hn/",
            "is_self": true,
            "selftext": "I wrote a thing.",
            "num_comments": 4,
            "created_utc": 1700000000.0
        }}]}}"#
}

fn comment_page_json() -> &'static str {
    r#"[
        {"kind": "Listing", "data": {"after": null, "before": null, "children": [
            {"kind": "t3", "data": {"id": "w1xyz", "title": "Show HN: a Reddit client in Rust",
             "created_utc": 1700000000.0}}]}},
        {"kind": "Listing", "data": {"after": null, "before": null, "children": [
            {"kind": "t1", "data": {"id": "aa1", "name": "t1_aa1", "author": "alice",
             "body": "Looks great!", "body_html": null, "parent_id": "t3_w1xyz",
             "link_id": "t3_w1xyz", "created_utc": 1700000100.0, "replies": ""}},
            {"kind": "t1", "data": {"id": "bb2", "name": "t1_bb2", "author": "bob",
             "body": "Star earned.", "body_html": null, "parent_id": "t3_w1xyz",
             "link_id": "t3_w1xyz", "created_utc": 1700000200.0, "replies": ""}},
            {"kind": "more", "data": {"id": "cc3", "name": "t1_cc3", "count": 2,
             "parent_id": "t3_w1xyz", "depth": 0, "children": ["cc3", "dd4"]}}
        ]}}]"#
}

fn expansion_json() -> &'static str {
    r#"{"json": {"errors": [], "data": {"things": [
        {"kind": "t1", "data": {"id": "cc3", "name": "t1_cc3", "author": "carol",
         "body": "Late to the party.", "body_html": null, "parent_id": "t3_w1xyz",
         "link_id": "t3_w1xyz", "created_utc": 1700000300.0, "replies": ""}},
        {"kind": "t1", "data": {"id": "dd4", "name": "t1_dd4", "author": "dave",
         "body": "Same.", "body_html": null, "parent_id": "t3_w1xyz",
         "link_id": "t3_w1xyz", "created_utc": 1700000400.0, "replies": ""}}
    ]}}}"#
}

#[tokio::test]
async fn test_integration_fetch_post_and_comments() {
    let mut server = mockito::Server::new_async().await;
    let _post = server
        .mock("GET", "/by_id/t3_w1xyz.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(post_listing_json())
        .create_async()
        .await;
    let _comments = server
        .mock("GET", "/comments/w1xyz.json?limit=25")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comment_page_json())
        .create_async()
        .await;

    let client = RedditClient::with_user_agent("redlink-integration/0.1".to_string())
        .with_base_url(server.url());

    let post = client.post("w1xyz").await.expect("Failed to fetch post");
    assert_eq!(post.data.title, "Show HN: a Reddit client in Rust");
    assert_eq!(post.fullname(), "t3_w1xyz");

    let comments = post.comments(25).await.expect("Failed to fetch comments");
    let authors: Vec<&str> = comments.iter().map(|c| c.author.as_str()).collect();
    assert_eq!(authors, vec!["alice", "bob"]);

    let nodes = post
        .comments_with_more(25)
        .await
        .expect("Failed to fetch nodes");
    assert_eq!(nodes.len(), 3);
    assert!(nodes[2].is_more());
}

#[tokio::test]
async fn test_integration_walk_expands_placeholders() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/comments/w1xyz.json?limit=25")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(comment_page_json())
        .expect(2)
        .create_async()
        .await;
    let _expansion = server
        .mock(
            "GET",
            "/api/morechildren.json?api_type=json&link_id=t3_w1xyz&children=cc3,dd4",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(expansion_json())
        .expect(2)
        .create_async()
        .await;

    let client = RedditClient::with_user_agent("redlink-integration/0.1".to_string())
        .with_base_url(server.url());

    // Pull-based walk
    let mut walk = client.comment_stream("w1xyz", 25);
    let mut ids = Vec::new();
    while let Some(item) = walk.next().await {
        ids.push(item.expect("walk failed").id);
    }
    assert_eq!(ids, vec!["aa1", "bb2", "cc3", "dd4"]);

    // Same walk through the Stream adapter
    let collected: Vec<_> = client.comment_stream("w1xyz", 25).into_stream().collect().await;
    let stream_ids: Vec<String> = collected
        .into_iter()
        .map(|item| item.expect("stream failed").id)
        .collect();
    assert_eq!(stream_ids, ids);
}

#[tokio::test]
async fn test_integration_comment_requires_session() {
    let mut server = mockito::Server::new_async().await;
    let _post = server
        .mock("GET", "/by_id/t3_w1xyz.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(post_listing_json())
        .create_async()
        .await;
    let never_called = server
        .mock("POST", "/api/comment")
        .expect(0)
        .create_async()
        .await;

    let client = RedditClient::with_user_agent("redlink-integration/0.1".to_string())
        .with_base_url(server.url());

    let post = client.post("w1xyz").await.expect("Failed to fetch post");
    let err = post.comment("first!").await.expect_err("should need auth");
    assert!(matches!(err, redlink::RedditError::AuthenticationRequired));
    never_called.assert_async().await;
}

#[tokio::test]
async fn test_integration_comment_roundtrip() {
    let mut server = mockito::Server::new_async().await;
    let _post = server
        .mock("GET", "/by_id/t3_w1xyz.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(post_listing_json())
        .create_async()
        .await;
    let _comment = server
        .mock("POST", "/api/comment")
        .match_header("authorization", "Bearer session-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"json": {"errors": [], "data": {"things": [
                {"kind": "t1", "data": {"id": "ee5", "name": "t1_ee5", "author": "builder",
                 "body": "first!", "body_html": null, "parent_id": "t3_w1xyz",
                 "link_id": "t3_w1xyz",
                 "permalink": "/r/rust/comments/w1xyz/show_hn/ee5/",
                 "created_utc": 1700000500.0, "replies": ""}}]}}}"#,
        )
        .create_async()
        .await;

    let mut client = RedditClient::with_user_agent("redlink-integration/0.1".to_string())
        .with_base_url(server.url());
    client.set_access_token("session-token");

    let post = client.post("w1xyz").await.expect("Failed to fetch post");
    let comment = post.comment("first!").await.expect("Failed to comment");

    assert_eq!(comment.id, "ee5");
    assert_eq!(comment.link_id, post.fullname());
    assert_eq!(
        comment.permalink.as_deref(),
        Some("/r/rust/comments/w1xyz/show_hn/ee5/")
    );
}

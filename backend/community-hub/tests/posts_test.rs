//! Post repository behaviour over the in-memory store

mod common;

use common::{instant, memory_hub, post_fields, FailingStore};
use community_hub::error::MULTIPLE_IDS_MESSAGE;
use community_hub::store::{DocumentStore, Value};
use community_hub::{HubError, Post, PostRepository, StoreError};
use std::sync::Arc;

#[tokio::test]
async fn test_get_posts_newest_first() {
    let (hub, store) = memory_hub();
    let t1 = instant(2021, 7, 1);
    let t2 = instant(2021, 7, 2);
    store
        .set("posts", "a", post_fields("ana", "first", 0, Value::Timestamp(t1)))
        .await
        .unwrap();
    store
        .set("posts", "b", post_fields("bia", "second", 2, Value::Timestamp(t2)))
        .await
        .unwrap();

    let posts = hub.get_posts().await.unwrap();

    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(posts[0].created_at, "2021-07-02T12:00:00.000Z");
    assert_eq!(posts[0].created_at_instant().unwrap(), t2);
    assert_eq!(posts[1].created_at_instant().unwrap(), t1);
}

#[tokio::test]
async fn test_get_posts_empty_collection() {
    let (hub, _store) = memory_hub();
    assert!(hub.get_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_posts_rejects_non_timestamp_created_at() {
    let (hub, store) = memory_hub();
    store
        .set(
            "posts",
            "good",
            post_fields("ana", "ok", 0, Value::Timestamp(instant(2021, 7, 1))),
        )
        .await
        .unwrap();
    store
        .set("posts", "bad", post_fields("bia", "legacy", 0, Value::Integer(1626782400)))
        .await
        .unwrap();

    let err = hub.get_posts().await.unwrap_err();
    match err {
        HubError::InvalidDocument { collection, id, .. } => {
            assert_eq!(collection, "posts");
            assert_eq!(id, "bad");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_posts_excludes_posts_without_created_at() {
    let (hub, store) = memory_hub();
    store
        .set(
            "posts",
            "dated",
            post_fields("ana", "ok", 0, Value::Timestamp(instant(2021, 7, 1))),
        )
        .await
        .unwrap();
    let mut undated = post_fields("bia", "draft", 0, Value::Null(()));
    undated.remove("createdAt");
    store.set("posts", "undated", undated).await.unwrap();

    // the ordered query only sees documents carrying the order field
    let posts = hub.get_posts().await.unwrap();
    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["dated"]);

    match hub.get_post("undated").await.unwrap_err() {
        HubError::InvalidDocument { id, reason, .. } => {
            assert_eq!(id, "undated");
            assert_eq!(reason, "missing createdAt");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_then_get_post() {
    let (hub, store) = memory_hub();
    let post = Post::new("miguelsndc", "Bem vindo");

    hub.create_post(&post).await.unwrap();
    let stored = hub.get_post(post.id.as_str()).await.unwrap();

    assert_eq!(stored, post);
    // written as a native timestamp, not as the caller's string
    let raw = store.get("posts", &post.id).await.unwrap().unwrap();
    assert!(matches!(raw.fields["createdAt"], Value::Timestamp(_)));
    assert_eq!(raw.fields["id"], Value::from(post.id.as_str()));
}

#[tokio::test]
async fn test_create_post_replaces_existing() {
    let (hub, _store) = memory_hub();
    let mut post = Post::new("ana", "draft");
    hub.create_post(&post).await.unwrap();

    post.content = "final".to_string();
    post.likes = 4;
    hub.create_post(&post).await.unwrap();

    let stored = hub.get_post(post.id.clone()).await.unwrap();
    assert_eq!(stored.content, "final");
    assert_eq!(stored.likes, 4);
}

#[tokio::test]
async fn test_create_post_rejects_unparseable_created_at() {
    let (hub, store) = memory_hub();
    let mut post = Post::new("ana", "hi");
    post.created_at = "last tuesday".to_string();

    let err = hub.create_post(&post).await.unwrap_err();
    assert!(matches!(err, HubError::InvalidInput(_)));
    assert!(store.is_empty("posts"));
}

#[tokio::test]
async fn test_get_post_list_input_rejected() {
    let store = Arc::new(FailingStore::default());
    let repo = PostRepository::new(store.clone());

    let err = repo.get_post(vec!["a", "b"]).await.unwrap_err();

    match err {
        HubError::InvalidInput(message) => assert_eq!(message, MULTIPLE_IDS_MESSAGE),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_get_post_missing() {
    let (hub, _store) = memory_hub();
    let err = hub.get_post("nope").await.unwrap_err();
    assert!(matches!(err, HubError::NotFound(_)));
}

#[tokio::test]
async fn test_get_post_non_timestamp_fails_once() {
    let (hub, store) = memory_hub();
    store
        .set(
            "posts",
            "legacy",
            post_fields("ana", "old", 1, Value::from("2021-07-20T12:00:00.000Z")),
        )
        .await
        .unwrap();

    let err = hub.get_post("legacy").await.unwrap_err();
    assert!(matches!(err, HubError::InvalidDocument { .. }));
}

#[tokio::test]
async fn test_toggle_like_increments_and_decrements() {
    let (hub, _store) = memory_hub();
    let post = Post::new("ana", "like me");
    hub.create_post(&post).await.unwrap();

    assert_eq!(hub.toggle_like(&post.id, 7, false).await.unwrap(), 8);
    assert_eq!(hub.get_post(post.id.as_str()).await.unwrap().likes, 8);

    assert_eq!(hub.toggle_like(&post.id, 7, true).await.unwrap(), 6);
    let stored = hub.get_post(post.id.as_str()).await.unwrap();
    assert_eq!(stored.likes, 6);
    // only likes is touched
    assert_eq!(stored.content, "like me");
    assert_eq!(stored.created_at, post.created_at);
}

#[tokio::test]
async fn test_toggle_like_last_write_wins() {
    let (hub, _store) = memory_hub();
    let post = Post::new("ana", "race");
    hub.create_post(&post).await.unwrap();

    // two likes computed from the same stale count collapse into one
    let (a, b) = tokio::join!(
        hub.toggle_like(&post.id, 0, false),
        hub.toggle_like(&post.id, 0, false)
    );
    assert_eq!(a.unwrap(), 1);
    assert_eq!(b.unwrap(), 1);
    assert_eq!(hub.get_post(post.id.as_str()).await.unwrap().likes, 1);
}

#[tokio::test]
async fn test_toggle_like_missing_post() {
    let (hub, store) = memory_hub();
    let err = hub.toggle_like("ghost", 0, false).await.unwrap_err();

    assert!(matches!(err, HubError::Store(StoreError::NotFound { .. })));
    assert!(store.is_empty("posts"));
}

#[tokio::test]
async fn test_store_errors_pass_through() {
    let store = Arc::new(FailingStore::default());
    let repo = PostRepository::new(store.clone());

    let err = repo.get_posts().await.unwrap_err();
    assert_eq!(err.to_string(), "Store returned 403: Missing or insufficient permissions.");
    assert!(matches!(
        repo.create_post(&Post::new("a", "b")).await,
        Err(HubError::Store(StoreError::Status { code: 403, .. }))
    ));
    assert_eq!(store.call_count(), 2);
}

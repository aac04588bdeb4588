//! Integration tests for candidate collection.

use skysweep::app::{collect_authored, collect_likes};
use skysweep::testkit::{
    day, failed_page, like, other_post_uri, page, post, FakeAccountClient,
};

#[tokio::test]
async fn likes_pagination_follows_cursors_to_exhaustion() {
    let client = FakeAccountClient::new().with_likes_pages(vec![
        page(vec![like("a", other_post_uri("x"), day(1))], Some("c1")),
        page(vec![like("b", other_post_uri("y"), day(2))], Some("c2")),
        page(vec![like("c", other_post_uri("z"), day(3))], None),
    ]);
    let session = FakeAccountClient::session();

    let collected = collect_likes(&client, &session, None).await;

    assert!(collected.complete);
    assert_eq!(collected.items.len(), 3);
    assert_eq!(collected.last_cursor.as_deref(), Some("c2"));
    assert_eq!(
        *client.like_cursors_requested.lock().unwrap(),
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );
}

#[tokio::test]
async fn likes_ceiling_stops_pagination_early() {
    let client = FakeAccountClient::new().with_likes_pages(vec![
        page(vec![like("a", other_post_uri("x"), day(1))], Some("c1")),
        page(vec![like("b", other_post_uri("y"), day(2))], Some("c2")),
        page(vec![like("c", other_post_uri("z"), day(3))], Some("c3")),
    ]);
    let session = FakeAccountClient::session();

    let collected = collect_likes(&client, &session, Some("c2")).await;

    // The ceiling is an intentional bound, so the collection still counts
    // as complete.
    assert!(collected.complete);
    assert_eq!(collected.items.len(), 2);
    assert_eq!(collected.last_cursor.as_deref(), Some("c2"));
    assert_eq!(client.like_cursors_requested.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_likes_page_truncates_and_marks_incomplete() {
    let client = FakeAccountClient::new().with_likes_pages(vec![
        page(vec![like("a", other_post_uri("x"), day(1))], Some("c1")),
        failed_page("connection reset"),
        page(vec![like("c", other_post_uri("z"), day(3))], None),
    ]);
    let session = FakeAccountClient::session();

    let collected = collect_likes(&client, &session, None).await;

    assert!(!collected.complete);
    assert_eq!(collected.items.len(), 1);
    assert_eq!(collected.last_cursor.as_deref(), Some("c1"));
}

#[tokio::test]
async fn repeated_likes_cursor_stops_pagination() {
    let client = FakeAccountClient::new().with_likes_pages(vec![
        page(vec![like("a", other_post_uri("x"), day(1))], Some("same")),
        page(vec![like("b", other_post_uri("y"), day(2))], Some("same")),
    ]);
    let session = FakeAccountClient::session();

    let collected = collect_likes(&client, &session, None).await;

    assert!(collected.complete);
    assert_eq!(collected.items.len(), 2);
}

#[tokio::test]
async fn authored_pagination_collects_all_pages() {
    let client = FakeAccountClient::new().with_authored_pages(vec![
        page(vec![post("p1", day(1), 0), post("p2", day(2), 3)], Some("c1")),
        page(vec![post("p3", day(3), 0)], None),
    ]);
    let session = FakeAccountClient::session();

    let collected = collect_authored(&client, &session).await;

    assert!(collected.complete);
    assert_eq!(collected.items.len(), 3);
    assert_eq!(collected.last_cursor.as_deref(), Some("c1"));
}

#[tokio::test]
async fn failed_authored_page_marks_incomplete() {
    let client = FakeAccountClient::new().with_authored_pages(vec![
        page(vec![post("p1", day(1), 0)], Some("c1")),
        failed_page("502 bad gateway"),
    ]);
    let session = FakeAccountClient::session();

    let collected = collect_authored(&client, &session).await;

    assert!(!collected.complete);
    assert_eq!(collected.items.len(), 1);
}

#[tokio::test]
async fn empty_collections_complete_immediately() {
    let client = FakeAccountClient::new();
    let session = FakeAccountClient::session();

    let likes = collect_likes(&client, &session, None).await;
    let authored = collect_authored(&client, &session).await;

    assert!(likes.complete && likes.items.is_empty());
    assert!(likes.last_cursor.is_none());
    assert!(authored.complete && authored.items.is_empty());
}

//! Test fixtures: record builders and a scripted in-memory account client.
//!
//! Compiled only for tests or with the `testkit` feature.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::account::{AccountClient, Credentials, Page, Session};
use crate::domain::{Did, Like, Post, RecordUri};
use crate::error::{AuthError, CollectionError, MutationError};

pub const OWNER_DID: &str = "did:plc:owner";

/// Fixed reference instant plus `n` days, so day math in tests is exact.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
}

pub fn post_uri(rkey: &str) -> RecordUri {
    RecordUri::new(format!("at://{OWNER_DID}/app.bsky.feed.post/{rkey}"))
}

pub fn like_uri(rkey: &str) -> RecordUri {
    RecordUri::new(format!("at://{OWNER_DID}/app.bsky.feed.like/{rkey}"))
}

pub fn other_post_uri(rkey: &str) -> RecordUri {
    RecordUri::new(format!("at://did:plc:somebody/app.bsky.feed.post/{rkey}"))
}

pub fn post(rkey: &str, created_at: DateTime<Utc>, repost_count: u64) -> Post {
    Post {
        uri: post_uri(rkey),
        created_at,
        repost_count,
        domains: BTreeSet::new(),
    }
}

pub fn post_with_domains(
    rkey: &str,
    created_at: DateTime<Utc>,
    repost_count: u64,
    domains: &[&str],
) -> Post {
    Post {
        uri: post_uri(rkey),
        created_at,
        repost_count,
        domains: domains.iter().map(|domain| domain.to_string()).collect(),
    }
}

pub fn like(rkey: &str, target: RecordUri, created_at: DateTime<Utc>) -> Like {
    Like {
        uri: like_uri(rkey),
        target,
        created_at,
    }
}

/// A scripted page: either a page to return, or a reason to fail with.
pub type PageScript<T> = Result<Page<T>, String>;

pub fn page<T>(items: Vec<T>, cursor: Option<&str>) -> PageScript<T> {
    Ok(Page {
        items,
        cursor: cursor.map(str::to_string),
    })
}

pub fn failed_page<T>(reason: &str) -> PageScript<T> {
    Err(reason.to_string())
}

/// In-memory [`AccountClient`] that serves scripted pages in order and
/// records every mutation.
#[derive(Default)]
pub struct FakeAccountClient {
    likes: Mutex<Vec<PageScript<Like>>>,
    authored: Mutex<Vec<PageScript<Post>>>,
    blobs: Mutex<Vec<PageScript<String>>>,
    archive: Vec<u8>,
    failing_uris: Vec<String>,
    pub like_cursors_requested: Mutex<Vec<Option<String>>>,
    pub unliked: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

impl FakeAccountClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_likes_pages(self, pages: Vec<PageScript<Like>>) -> Self {
        *self.likes.lock().unwrap() = pages;
        self
    }

    pub fn with_authored_pages(self, pages: Vec<PageScript<Post>>) -> Self {
        *self.authored.lock().unwrap() = pages;
        self
    }

    pub fn with_blob_pages(self, pages: Vec<PageScript<String>>) -> Self {
        *self.blobs.lock().unwrap() = pages;
        self
    }

    pub fn with_archive(mut self, bytes: Vec<u8>) -> Self {
        self.archive = bytes;
        self
    }

    /// Any mutation against this uri will fail.
    pub fn failing_mutation(mut self, uri: &RecordUri) -> Self {
        self.failing_uris.push(uri.to_string());
        self
    }

    pub fn session() -> Session {
        Session {
            did: Did::new(OWNER_DID),
            handle: "owner.test".to_string(),
            access_jwt: "test-jwt".to_string(),
        }
    }

    fn mutate(&self, op: &'static str, uri: &RecordUri) -> Result<(), MutationError> {
        if self.failing_uris.contains(&uri.to_string()) {
            return Err(MutationError::Rejected {
                op,
                uri: uri.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

fn next_page<T>(
    script: &Mutex<Vec<PageScript<T>>>,
    collection: &'static str,
    cursor: Option<&str>,
) -> Result<Page<T>, CollectionError> {
    let mut pages = script.lock().unwrap();
    if pages.is_empty() {
        return Ok(Page {
            items: Vec::new(),
            cursor: None,
        });
    }
    pages.remove(0).map_err(|reason| CollectionError::PageFetch {
        collection,
        cursor: cursor.map(str::to_string),
        reason,
    })
}

#[async_trait]
impl AccountClient for FakeAccountClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.password == "wrong" {
            return Err(AuthError::InvalidCredentials {
                identifier: credentials.identifier.clone(),
            });
        }
        Ok(Self::session())
    }

    async fn fetch_likes_page(
        &self,
        _session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<Like>, CollectionError> {
        self.like_cursors_requested
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));
        next_page(&self.likes, "likes", cursor)
    }

    async fn fetch_authored_page(
        &self,
        _session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<Post>, CollectionError> {
        next_page(&self.authored, "authored", cursor)
    }

    async fn fetch_archive(&self, _session: &Session) -> Result<Vec<u8>, CollectionError> {
        Ok(self.archive.clone())
    }

    async fn list_blobs_page(
        &self,
        _session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<String>, CollectionError> {
        next_page(&self.blobs, "blobs", cursor)
    }

    async fn fetch_blob(&self, _session: &Session, cid: &str) -> Result<Vec<u8>, CollectionError> {
        Ok(format!("blob-{cid}").into_bytes())
    }

    async fn unlike(&self, _session: &Session, like: &RecordUri) -> Result<(), MutationError> {
        self.mutate("unlike", like)?;
        self.unliked.lock().unwrap().push(like.to_string());
        Ok(())
    }

    async fn delete_post(
        &self,
        _session: &Session,
        post: &RecordUri,
    ) -> Result<(), MutationError> {
        self.mutate("delete", post)?;
        self.deleted.lock().unwrap().push(post.to_string());
        Ok(())
    }
}

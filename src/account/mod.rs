//! Account client trait definitions.
//!
//! The trait defines the remote capability surface the sweep needs; wire
//! formats and retry policy are the implementation's concern.

use async_trait::async_trait;

use crate::domain::{Did, Like, Post, RecordUri};
use crate::error::{AuthError, CollectionError, MutationError};

/// Login credentials. The app password comes from the environment, never
/// from the config file.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// An authenticated session against the account's PDS.
#[derive(Debug, Clone)]
pub struct Session {
    pub did: Did,
    pub handle: String,
    pub access_jwt: String,
}

/// One page of a remote collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Opaque token resuming after this page; `None` when exhausted.
    pub cursor: Option<String>,
}

/// Remote account operations required by the sweep.
#[async_trait]
pub trait AccountClient: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// One page of the account's like records.
    async fn fetch_likes_page(
        &self,
        session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<Like>, CollectionError>;

    /// One page of the account's posts, replies, and reposts.
    async fn fetch_authored_page(
        &self,
        session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<Post>, CollectionError>;

    /// The full repo as an opaque binary container.
    async fn fetch_archive(&self, session: &Session) -> Result<Vec<u8>, CollectionError>;

    /// One page of the account's media blob CIDs.
    async fn list_blobs_page(
        &self,
        session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<String>, CollectionError>;

    async fn fetch_blob(&self, session: &Session, cid: &str) -> Result<Vec<u8>, CollectionError>;

    /// Remove a like record.
    async fn unlike(&self, session: &Session, like: &RecordUri) -> Result<(), MutationError>;

    /// Delete an authored record (post, reply, or repost).
    async fn delete_post(&self, session: &Session, post: &RecordUri)
        -> Result<(), MutationError>;
}

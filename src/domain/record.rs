//! Candidate records gathered from the account, rebuilt fresh on every run.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::id::RecordUri;

/// One authored item: an original post, a reply, or a repost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// The record a deletion must remove. For a repost this is the account's
    /// own repost record, not the subject post.
    pub uri: RecordUri,
    pub created_at: DateTime<Utc>,
    pub repost_count: u64,
    /// Lowercased hosts of embedded and linked URLs.
    pub domains: BTreeSet<String>,
}

/// One like record by the account.
///
/// A like targeting the account's own post is the preservation mark for that
/// post; it is never stored as a flag on [`Post`], only derived per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    /// The like record itself, needed to unlike.
    pub uri: RecordUri,
    /// The liked post.
    pub target: RecordUri,
    pub created_at: DateTime<Utc>,
}

//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account DID - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Did(String);

impl Did {
    /// Create a new `Did` from a string.
    pub fn new(did: impl Into<String>) -> Self {
        Self(did.into())
    }

    /// Get the DID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Did {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Did {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Record URI (`at://<authority>/<collection>/<rkey>`) - newtype for type
/// safety, identifying posts, reposts, and like records alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordUri(String);

impl RecordUri {
    /// Create a new `RecordUri` from a string.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Get the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parts(&self) -> Option<(&str, &str, &str)> {
        let rest = self.0.strip_prefix("at://")?;
        let mut segments = rest.splitn(3, '/');
        let authority = segments.next()?;
        let collection = segments.next()?;
        let rkey = segments.next()?;
        if authority.is_empty() || collection.is_empty() || rkey.is_empty() {
            return None;
        }
        Some((authority, collection, rkey))
    }

    /// The DID that owns the record, if the URI is well-formed.
    pub fn authority(&self) -> Option<&str> {
        self.parts().map(|(authority, _, _)| authority)
    }

    /// The record collection (NSID), e.g. `app.bsky.feed.post`.
    pub fn collection(&self) -> Option<&str> {
        self.parts().map(|(_, collection, _)| collection)
    }

    /// The record key within its collection.
    pub fn rkey(&self) -> Option<&str> {
        self.parts().map(|(_, _, rkey)| rkey)
    }
}

impl fmt::Display for RecordUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordUri {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RecordUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uri_exposes_its_parts() {
        let uri = RecordUri::new("at://did:plc:abc123/app.bsky.feed.post/3k44aaa");
        assert_eq!(uri.authority(), Some("did:plc:abc123"));
        assert_eq!(uri.collection(), Some("app.bsky.feed.post"));
        assert_eq!(uri.rkey(), Some("3k44aaa"));
    }

    #[test]
    fn malformed_uri_has_no_parts() {
        for raw in [
            "https://example.com/post/1",
            "at://did:plc:abc123",
            "at://did:plc:abc123/app.bsky.feed.post",
            "at:///app.bsky.feed.post/3k44aaa",
            "",
        ] {
            let uri = RecordUri::new(raw);
            assert_eq!(uri.authority(), None, "expected no parts for {raw:?}");
        }
    }
}

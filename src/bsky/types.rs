//! Wire types for the XRPC endpoints the client touches.
//!
//! Deserialization is tolerant: fields the sweep does not read are omitted,
//! and optional metadata defaults instead of failing the page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub did: String,
    pub handle: String,
    pub access_jwt: String,
}

#[derive(Debug, Deserialize)]
pub struct ListRecordsResponse {
    pub records: Vec<LikeRecordEnvelope>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeRecordEnvelope {
    pub uri: String,
    pub value: LikeRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
    pub subject: SubjectRef,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SubjectRef {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorFeedResponse {
    pub feed: Vec<FeedItem>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedItem {
    pub post: PostView,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub uri: String,
    pub author: AuthorRef,
    pub record: PostRecord,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub embed: Option<EmbedView>,
    #[serde(default)]
    pub viewer: Option<ViewerState>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRef {
    pub did: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub created_at: String,
    #[serde(default)]
    pub facets: Vec<Facet>,
}

#[derive(Debug, Deserialize)]
pub struct Facet {
    #[serde(default)]
    pub features: Vec<FacetFeature>,
}

/// Rich-text feature. Only link features carry a uri; mentions and tags
/// deserialize with `uri: None`.
#[derive(Debug, Deserialize)]
pub struct FacetFeature {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmbedView {
    #[serde(default)]
    pub external: Option<ExternalEmbed>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalEmbed {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    /// The viewer's own repost of this post, when one exists.
    #[serde(default)]
    pub repost: Option<String>,
    #[serde(default)]
    pub like: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListBlobsResponse {
    pub cids: Vec<String>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub rkey: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_feed_page_deserializes() {
        let body = r#"{
            "feed": [{
                "post": {
                    "uri": "at://did:plc:abc/app.bsky.feed.post/3k1",
                    "cid": "bafy123",
                    "author": {"did": "did:plc:abc", "handle": "alice.test"},
                    "record": {
                        "$type": "app.bsky.feed.post",
                        "text": "look at this",
                        "createdAt": "2024-01-10T08:30:00.000Z",
                        "facets": [{
                            "index": {"byteStart": 0, "byteEnd": 4},
                            "features": [{
                                "$type": "app.bsky.richtext.facet#link",
                                "uri": "https://Example.com/story"
                            }]
                        }]
                    },
                    "repostCount": 12,
                    "likeCount": 3,
                    "embed": {
                        "$type": "app.bsky.embed.external#view",
                        "external": {
                            "uri": "https://news.example.org/a",
                            "title": "A",
                            "description": ""
                        }
                    },
                    "viewer": {"repost": "at://did:plc:me/app.bsky.feed.repost/3r1"}
                }
            }],
            "cursor": "page-2"
        }"#;

        let page: AuthorFeedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.cursor.as_deref(), Some("page-2"));
        let post = &page.feed[0].post;
        assert_eq!(post.repost_count, 12);
        assert_eq!(post.record.created_at, "2024-01-10T08:30:00.000Z");
        assert_eq!(
            post.embed.as_ref().unwrap().external.as_ref().unwrap().uri,
            "https://news.example.org/a"
        );
        assert_eq!(
            post.record.facets[0].features[0].uri.as_deref(),
            Some("https://Example.com/story")
        );
        assert_eq!(
            post.viewer.as_ref().unwrap().repost.as_deref(),
            Some("at://did:plc:me/app.bsky.feed.repost/3r1")
        );
    }

    #[test]
    fn like_records_page_deserializes() {
        let body = r#"{
            "records": [{
                "uri": "at://did:plc:me/app.bsky.feed.like/3l1",
                "cid": "bafy456",
                "value": {
                    "$type": "app.bsky.feed.like",
                    "subject": {"uri": "at://did:plc:abc/app.bsky.feed.post/3k1", "cid": "bafy123"},
                    "createdAt": "2024-01-05T00:00:00Z"
                }
            }],
            "cursor": null
        }"#;

        let page: ListRecordsResponse = serde_json::from_str(body).unwrap();
        assert!(page.cursor.is_none());
        assert_eq!(
            page.records[0].value.subject.uri,
            "at://did:plc:abc/app.bsky.feed.post/3k1"
        );
    }

    #[test]
    fn mention_facets_have_no_uri() {
        let body = r#"{
            "features": [{
                "$type": "app.bsky.richtext.facet#mention",
                "did": "did:plc:other"
            }]
        }"#;

        let facet: Facet = serde_json::from_str(body).unwrap();
        assert!(facet.features[0].uri.is_none());
    }
}

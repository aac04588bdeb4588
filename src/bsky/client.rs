use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::account::{AccountClient, Credentials, Page, Session};
use crate::domain::{Did, Like, Post, RecordUri};
use crate::error::{AuthError, CollectionError, MutationError};

use super::types::{
    AuthorFeedResponse, CreateSessionRequest, CreateSessionResponse, DeleteRecordRequest,
    ListBlobsResponse, ListRecordsResponse, PostView,
};

const LIKE_COLLECTION: &str = "app.bsky.feed.like";
const PAGE_LIMIT: &str = "100";

/// XRPC client for a Bluesky PDS.
pub struct BskyClient {
    http: Client,
    service: String,
}

impl BskyClient {
    pub fn new(service: impl Into<String>) -> Self {
        let service: String = service.into();
        Self {
            http: Client::new(),
            service: service.trim_end_matches('/').to_string(),
        }
    }

    fn xrpc(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.service, method)
    }

    async fn get_collection(
        &self,
        session: &Session,
        collection: &'static str,
        method: &str,
        query: &[(&str, &str)],
        cursor: Option<&str>,
    ) -> Result<reqwest::Response, CollectionError> {
        let mut query: Vec<(&str, &str)> = query.to_vec();
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        let response = self
            .http
            .get(self.xrpc(method))
            .bearer_auth(&session.access_jwt)
            .query(&query)
            .send()
            .await
            .map_err(|err| page_fetch(collection, cursor, err.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(page_fetch(collection, cursor, format!("{status} {body}")))
    }

    async fn delete_record(
        &self,
        session: &Session,
        op: &'static str,
        uri: &RecordUri,
    ) -> Result<(), MutationError> {
        let (Some(repo), Some(collection), Some(rkey)) =
            (uri.authority(), uri.collection(), uri.rkey())
        else {
            return Err(MutationError::MalformedUri {
                uri: uri.to_string(),
            });
        };

        let body = DeleteRecordRequest {
            repo,
            collection,
            rkey,
        };
        let response = self
            .http
            .post(self.xrpc("com.atproto.repo.deleteRecord"))
            .bearer_auth(&session.access_jwt)
            .json(&body)
            .send()
            .await
            .map_err(|source| MutationError::Transport {
                op,
                uri: uri.to_string(),
                source,
            })?;

        if response.status().is_success() {
            debug!(%uri, op, "record deleted");
            return Ok(());
        }
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(MutationError::Rejected {
            op,
            uri: uri.to_string(),
            reason: format!("{status} {text}"),
        })
    }
}

fn page_fetch(collection: &'static str, cursor: Option<&str>, reason: String) -> CollectionError {
    CollectionError::PageFetch {
        collection,
        cursor: cursor.map(str::to_string),
        reason,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            warn!(raw, error = %err, "skipping record with unparseable timestamp");
            None
        }
    }
}

/// Lowercased hosts of the post's external embed and rich-text links.
fn link_domains(view: &PostView) -> BTreeSet<String> {
    let mut domains = BTreeSet::new();
    let mut collect = |raw: &str| {
        if let Ok(parsed) = Url::parse(raw) {
            if let Some(host) = parsed.host_str() {
                domains.insert(host.to_ascii_lowercase());
            }
        }
    };

    if let Some(external) = view.embed.as_ref().and_then(|embed| embed.external.as_ref()) {
        collect(&external.uri);
    }
    for facet in &view.record.facets {
        for feature in &facet.features {
            if let Some(uri) = &feature.uri {
                collect(uri);
            }
        }
    }
    domains
}

#[async_trait]
impl AccountClient for BskyClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let request = CreateSessionRequest {
            identifier: &credentials.identifier,
            password: &credentials.password,
        };
        let response = self
            .http
            .post(self.xrpc("com.atproto.server.createSession"))
            .json(&request)
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(AuthError::InvalidCredentials {
                identifier: credentials.identifier.clone(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Response(format!("{status} {body}")));
        }

        let body: CreateSessionResponse = response
            .json()
            .await
            .map_err(AuthError::Transport)?;
        debug!(did = %body.did, handle = %body.handle, "session created");
        Ok(Session {
            did: Did::new(body.did),
            handle: body.handle,
            access_jwt: body.access_jwt,
        })
    }

    async fn fetch_likes_page(
        &self,
        session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<Like>, CollectionError> {
        let response = self
            .get_collection(
                session,
                "likes",
                "com.atproto.repo.listRecords",
                &[
                    ("repo", session.did.as_str()),
                    ("collection", LIKE_COLLECTION),
                    ("limit", PAGE_LIMIT),
                ],
                cursor,
            )
            .await?;
        let body: ListRecordsResponse = response
            .json()
            .await
            .map_err(|err| page_fetch("likes", cursor, err.to_string()))?;

        let items: Vec<Like> = body
            .records
            .into_iter()
            .filter_map(|record| {
                let created_at = parse_timestamp(&record.value.created_at)?;
                Some(Like {
                    uri: RecordUri::new(record.uri),
                    target: RecordUri::new(record.value.subject.uri),
                    created_at,
                })
            })
            .collect();
        debug!(count = items.len(), cursor = ?body.cursor, "fetched likes page");
        Ok(Page {
            items,
            cursor: body.cursor,
        })
    }

    async fn fetch_authored_page(
        &self,
        session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<Post>, CollectionError> {
        let response = self
            .get_collection(
                session,
                "authored",
                "app.bsky.feed.getAuthorFeed",
                &[
                    ("actor", session.did.as_str()),
                    ("filter", "posts_with_replies"),
                    ("limit", PAGE_LIMIT),
                ],
                cursor,
            )
            .await?;
        let body: AuthorFeedResponse = response
            .json()
            .await
            .map_err(|err| page_fetch("authored", cursor, err.to_string()))?;

        let items: Vec<Post> = body
            .feed
            .into_iter()
            .filter_map(|item| {
                let view = item.post;
                let created_at = parse_timestamp(&view.record.created_at)?;
                let domains = link_domains(&view);
                let uri = if view.author.did == session.did.as_str() {
                    view.uri
                } else {
                    // Someone else's post in our feed is a repost; the record
                    // we own is the repost itself.
                    view.viewer.and_then(|viewer| viewer.repost)?
                };
                Some(Post {
                    uri: RecordUri::new(uri),
                    created_at,
                    repost_count: view.repost_count,
                    domains,
                })
            })
            .collect();
        debug!(count = items.len(), cursor = ?body.cursor, "fetched authored page");
        Ok(Page {
            items,
            cursor: body.cursor,
        })
    }

    async fn fetch_archive(&self, session: &Session) -> Result<Vec<u8>, CollectionError> {
        let response = self
            .get_collection(
                session,
                "repo",
                "com.atproto.sync.getRepo",
                &[("did", session.did.as_str())],
                None,
            )
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| page_fetch("repo", None, err.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn list_blobs_page(
        &self,
        session: &Session,
        cursor: Option<&str>,
    ) -> Result<Page<String>, CollectionError> {
        let response = self
            .get_collection(
                session,
                "blobs",
                "com.atproto.sync.listBlobs",
                &[("did", session.did.as_str())],
                cursor,
            )
            .await?;
        let body: ListBlobsResponse = response
            .json()
            .await
            .map_err(|err| page_fetch("blobs", cursor, err.to_string()))?;
        Ok(Page {
            items: body.cids,
            cursor: body.cursor,
        })
    }

    async fn fetch_blob(&self, session: &Session, cid: &str) -> Result<Vec<u8>, CollectionError> {
        let response = self
            .get_collection(
                session,
                "blobs",
                "com.atproto.sync.getBlob",
                &[("did", session.did.as_str()), ("cid", cid)],
                None,
            )
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| page_fetch("blobs", None, err.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn unlike(&self, session: &Session, like: &RecordUri) -> Result<(), MutationError> {
        self.delete_record(session, "unlike", like).await
    }

    async fn delete_post(
        &self,
        session: &Session,
        post: &RecordUri,
    ) -> Result<(), MutationError> {
        self.delete_record(session, "delete", post).await
    }
}

//! Sequential cursor pagination over the account's remote collections.

use tracing::{debug, warn};

use crate::account::{AccountClient, Page, Session};
use crate::domain::{Like, Post};

/// What one pagination pass gathered.
///
/// `last_cursor` is the final cursor observed, reusable as a future run's
/// likes ceiling. `complete: false` means a page fetch failed and `items`
/// is a truncated prefix; nothing may be mutated against it.
#[derive(Debug, Clone)]
pub struct Collected<T> {
    pub items: Vec<T>,
    pub last_cursor: Option<String>,
    pub complete: bool,
}

/// Page through the account's like records until exhausted or `ceiling` is
/// reached. The ceiling is an intentional bound on lookback, not a failure.
pub async fn collect_likes<C: AccountClient>(
    client: &C,
    session: &Session,
    ceiling: Option<&str>,
) -> Collected<Like> {
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut last_cursor: Option<String> = None;

    loop {
        match client.fetch_likes_page(session, cursor.as_deref()).await {
            Ok(Page { items: page, cursor: next }) => {
                debug!(count = page.len(), cursor = ?next, "likes page");
                items.extend(page);
                let Some(next) = next else {
                    return Collected { items, last_cursor, complete: true };
                };
                last_cursor = Some(next.clone());
                if ceiling == Some(next.as_str()) {
                    debug!(cursor = %next, "likes cursor ceiling reached");
                    return Collected { items, last_cursor, complete: true };
                }
                if cursor.as_deref() == Some(next.as_str()) {
                    // A server echoing the same cursor would loop forever.
                    warn!(cursor = %next, "likes cursor did not advance; stopping");
                    return Collected { items, last_cursor, complete: true };
                }
                cursor = Some(next);
            }
            Err(err) => {
                warn!(error = %err, "likes collection aborted");
                return Collected { items, last_cursor, complete: false };
            }
        }
    }
}

/// Page through the account's posts, replies, and reposts until exhausted.
pub async fn collect_authored<C: AccountClient>(
    client: &C,
    session: &Session,
) -> Collected<Post> {
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut last_cursor: Option<String> = None;

    loop {
        match client.fetch_authored_page(session, cursor.as_deref()).await {
            Ok(Page { items: page, cursor: next }) => {
                debug!(count = page.len(), cursor = ?next, "authored page");
                items.extend(page);
                let Some(next) = next else {
                    return Collected { items, last_cursor, complete: true };
                };
                last_cursor = Some(next.clone());
                if cursor.as_deref() == Some(next.as_str()) {
                    warn!(cursor = %next, "authored cursor did not advance; stopping");
                    return Collected { items, last_cursor, complete: true };
                }
                cursor = Some(next);
            }
            Err(err) => {
                warn!(error = %err, "authored collection aborted");
                return Collected { items, last_cursor, complete: false };
            }
        }
    }
}

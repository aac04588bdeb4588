//! Pre-sweep local archive of the account's repo and media blobs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::account::{AccountClient, Session};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub car_path: PathBuf,
    pub car_bytes: usize,
    pub blobs: usize,
}

/// Download the full repo container and every media blob into
/// `<root>/<sanitized did>/`. Runs before any mutation: an archive failure
/// aborts the run with nothing deleted.
pub async fn archive_account<C: AccountClient>(
    client: &C,
    session: &Session,
    root: &Path,
) -> Result<ArchiveSummary> {
    let dir = root.join(session.did.as_str().replace(':', "_"));
    let blob_dir = dir.join("_blob");
    fs::create_dir_all(&blob_dir)?;

    let repo = client.fetch_archive(session).await?;
    let stamp = Utc::now().format("%Y-%m-%dT%H_%M_%S");
    let car_path = dir.join(format!("bsky-archive-{stamp}.car"));
    fs::write(&car_path, &repo)?;
    info!(path = %car_path.display(), bytes = repo.len(), "repo archived");

    // Blob listing is paged like every other collection.
    let mut cids = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = client.list_blobs_page(session, cursor.as_deref()).await?;
        cids.extend(page.items);
        match page.cursor {
            Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
            _ => break,
        }
    }

    let bar = super::progress_bar(cids.len() as u64);
    for cid in &cids {
        let blob = client.fetch_blob(session, cid).await?;
        let path = blob_dir.join(format!("{cid}{}", media_extension(&blob)));
        fs::write(&path, &blob)?;
        debug!(path = %path.display(), "blob saved");
        bar.inc(1);
    }
    bar.finish_and_clear();
    info!(count = cids.len(), dir = %blob_dir.display(), "blobs archived");

    Ok(ArchiveSummary {
        car_path,
        car_bytes: repo.len(),
        blobs: cids.len(),
    })
}

/// Best-effort media extension from magic bytes.
fn media_extension(blob: &[u8]) -> &'static str {
    if blob.starts_with(&[0xFF, 0xD8, 0xFF]) {
        ".jpeg"
    } else if blob.starts_with(&[0x89, b'P', b'N', b'G']) {
        ".png"
    } else if blob.starts_with(b"GIF8") {
        ".gif"
    } else if blob.len() >= 12 && &blob[0..4] == b"RIFF" && &blob[8..12] == b"WEBP" {
        ".webp"
    } else {
        ""
    }
}

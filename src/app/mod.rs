//! Application orchestration: archive, collect, select, execute.

mod archive;
mod collector;
mod executor;

pub use archive::{archive_account, ArchiveSummary};
pub use collector::{collect_authored, collect_likes, Collected};
pub use executor::{ExecutionDriver, ExecutionReport};

use chrono::Utc;
use tracing::{info, warn};

use crate::account::AccountClient;
use crate::config::Config;
use crate::domain::build_plan;
use crate::error::Result;

/// Outcome of a full run, consumed by the CLI layer for reporting and the
/// exit-status contract.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub archived: Option<ArchiveSummary>,
    /// False for an archive-only run: no collection or mutation happened.
    pub swept: bool,
    pub likes_complete: bool,
    pub authored_complete: bool,
    /// Last likes cursor observed, reusable as a future `fixed_likes_cursor`.
    pub likes_last_cursor: Option<String>,
    pub likes_collected: usize,
    pub posts_collected: usize,
    pub planned_unlikes: usize,
    pub planned_deletions: usize,
    pub execution: ExecutionReport,
}

impl RunReport {
    /// Zero exit status only when every collection completed and every
    /// mutation succeeded.
    pub fn is_success(&self) -> bool {
        self.likes_complete && self.authored_complete && self.execution.failed == 0
    }

    /// Likes retained after the sweep, by any rule.
    pub fn likes_retained(&self) -> usize {
        self.likes_collected - self.planned_unlikes
    }

    /// Posts retained after the sweep, by any rule.
    pub fn posts_retained(&self) -> usize {
        self.posts_collected - self.planned_deletions
    }

    fn archive_only(archived: Option<ArchiveSummary>) -> Self {
        Self {
            archived,
            swept: false,
            likes_complete: true,
            authored_complete: true,
            likes_last_cursor: None,
            likes_collected: 0,
            posts_collected: 0,
            planned_unlikes: 0,
            planned_deletions: 0,
            execution: ExecutionReport::default(),
        }
    }
}

pub struct App;

impl App {
    pub async fn run<C: AccountClient>(config: &Config, client: &C) -> Result<RunReport> {
        let credentials = config.credentials()?;
        let session = client.authenticate(&credentials).await?;
        info!(did = %session.did, handle = %session.handle, "authenticated");

        let archived = if config.archive.skip {
            None
        } else {
            Some(archive_account(client, &session, &config.archive.root).await?)
        };

        if config.run.archive_only {
            return Ok(RunReport::archive_only(archived));
        }

        let policy = config.policy.retention_policy()?;

        let likes =
            collect_likes(client, &session, config.policy.fixed_likes_cursor.as_deref()).await;
        let authored = collect_authored(client, &session).await;
        info!(
            likes = likes.items.len(),
            authored = authored.items.len(),
            "candidates collected"
        );

        let mut plan = build_plan(&policy, &session.did, &likes.items, &authored.items, Utc::now());
        let planned_unlikes = plan.likes_to_remove.len();
        let planned_deletions = plan.posts_to_delete.len();

        // Never mutate against a collection that came back truncated. The
        // preservation marks derive from likes, so an incomplete like set
        // also blocks post deletion.
        if !likes.complete {
            warn!("likes collection incomplete; skipping all mutations");
            plan.likes_to_remove.clear();
            plan.posts_to_delete.clear();
        } else if !authored.complete {
            warn!("authored collection incomplete; skipping post deletion");
            plan.posts_to_delete.clear();
        }

        let execution = ExecutionDriver::new(client, &session)
            .auto_confirm(config.run.auto_confirm)
            .dry_run(config.run.dry_run)
            .execute(&plan)
            .await?;

        Ok(RunReport {
            archived,
            swept: true,
            likes_complete: likes.complete,
            authored_complete: authored.complete,
            likes_last_cursor: likes.last_cursor,
            likes_collected: likes.items.len(),
            posts_collected: authored.items.len(),
            planned_unlikes,
            planned_deletions,
            execution,
        })
    }
}

pub(crate) fn progress_bar(len: u64) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new(len);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("  [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );
    bar
}

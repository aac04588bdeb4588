//! Plan execution with per-item failure tolerance.

use dialoguer::Confirm;
use tracing::{error, info};

use crate::account::{AccountClient, Session};
use crate::domain::DeletionPlan;
use crate::error::Result;

/// Tally of one execution pass.
///
/// Counts are the unit of observability returned to the caller; individual
/// failures are logged where they happen, never propagated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub unliked: usize,
    pub deleted: usize,
    pub failed: usize,
}

pub struct ExecutionDriver<'a, C> {
    client: &'a C,
    session: &'a Session,
    auto_confirm: bool,
    dry_run: bool,
}

impl<'a, C: AccountClient> ExecutionDriver<'a, C> {
    pub fn new(client: &'a C, session: &'a Session) -> Self {
        Self {
            client,
            session,
            auto_confirm: false,
            dry_run: false,
        }
    }

    pub fn auto_confirm(mut self, yes: bool) -> Self {
        self.auto_confirm = yes;
        self
    }

    pub fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    /// Run the plan: unlike phase, then delete phase, each confirmed
    /// separately unless auto-confirm is set. A declined phase mutates
    /// nothing. Mutations are independent; one failure never aborts the
    /// rest.
    pub async fn execute(&self, plan: &DeletionPlan) -> Result<ExecutionReport> {
        let mut report = ExecutionReport::default();
        if plan.is_empty() {
            return Ok(report);
        }
        if self.dry_run {
            info!(
                unlikes = plan.likes_to_remove.len(),
                deletions = plan.posts_to_delete.len(),
                "dry run: leaving the account untouched"
            );
            return Ok(report);
        }

        let unlikes = plan.likes_to_remove.len();
        if unlikes > 0 && self.confirm(&format!(
            "Remove {unlikes} like{}? WARNING: this cannot be undone.",
            plural(unlikes)
        ))? {
            let bar = super::progress_bar(unlikes as u64);
            for like in &plan.likes_to_remove {
                match self.client.unlike(self.session, like).await {
                    Ok(()) => {
                        info!(uri = %like, "like removed");
                        report.unliked += 1;
                    }
                    Err(err) => {
                        error!(uri = %like, error = %err, "unlike failed");
                        report.failed += 1;
                    }
                }
                bar.inc(1);
            }
            bar.finish_and_clear();
        }

        let deletions = plan.posts_to_delete.len();
        if deletions > 0 && self.confirm(&format!(
            "Delete {deletions} post{}? WARNING: this cannot be undone.",
            plural(deletions)
        ))? {
            let bar = super::progress_bar(deletions as u64);
            for post in &plan.posts_to_delete {
                match self.client.delete_post(self.session, post).await {
                    Ok(()) => {
                        info!(uri = %post, "post deleted");
                        report.deleted += 1;
                    }
                    Err(err) => {
                        error!(uri = %post, error = %err, "delete failed");
                        report.failed += 1;
                    }
                }
                bar.inc(1);
            }
            bar.finish_and_clear();
        }

        Ok(report)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.auto_confirm {
            return Ok(true);
        }
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

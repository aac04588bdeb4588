//! Handler for the `run` command.

use tracing::info;

use crate::app::App;
use crate::bsky::BskyClient;
use crate::cli::{output, RunArgs};
use crate::config::Config;
use crate::error::Result;

/// Execute the run command. Returns whether the run was fully successful,
/// per the exit-status contract.
pub async fn execute(args: &RunArgs) -> Result<bool> {
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(max_reposts) = args.max_reposts {
        config.policy.max_reposts = max_reposts;
    }
    if let Some(stale_limit) = args.stale_limit {
        config.policy.stale_limit_days = stale_limit;
    }
    if let Some(ref domains) = args.domains_to_protect {
        config.policy.protected_domains = domains
            .split(',')
            .map(|domain| domain.trim().to_string())
            .filter(|domain| !domain.is_empty())
            .collect();
    }
    if let Some(ref cursor) = args.fixed_likes_cursor {
        config.policy.fixed_likes_cursor = Some(cursor.clone());
    }
    if args.yes {
        config.run.auto_confirm = true;
    }
    if args.dry_run {
        config.run.dry_run = true;
    }
    if args.skip_archive {
        config.archive.skip = true;
    }
    if args.archive_only {
        config.run.archive_only = true;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    } else if args.verbose == 1 {
        config.logging.level = "debug".to_string();
    } else if args.verbose >= 2 {
        config.logging.level = "trace".to_string();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }

    config.validate()?;
    config.init_logging();

    info!(
        max_reposts = config.policy.max_reposts,
        stale_limit_days = config.policy.stale_limit_days,
        dry_run = config.run.dry_run,
        "skysweep starting"
    );

    let client = BskyClient::new(config.account.service.clone());
    let report = App::run(&config, &client).await?;
    output::print_report(&report, config.run.dry_run);

    info!("skysweep finished");
    Ok(report.is_success())
}

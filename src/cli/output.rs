//! Console output for run results.

use owo_colors::OwoColorize;

use crate::app::RunReport;

/// Print the human-readable run summary. The tally always prints, even when
/// collections came back incomplete.
pub fn print_report(report: &RunReport, dry_run: bool) {
    println!();
    if let Some(archive) = &report.archived {
        println!(
            "{} archived repo ({} bytes, {} blob{}) to {}",
            "\u{2713}".green(),
            archive.car_bytes,
            archive.blobs,
            plural(archive.blobs),
            archive.car_path.display()
        );
    }

    if !report.swept {
        println!("Archive only: nothing was swept.");
        return;
    }

    println!(
        "Found {} like{} to remove and {} post{} to delete; retaining {} like{} and {} post{}.",
        report.planned_unlikes,
        plural(report.planned_unlikes),
        report.planned_deletions,
        plural(report.planned_deletions),
        report.likes_retained(),
        plural(report.likes_retained()),
        report.posts_retained(),
        plural(report.posts_retained())
    );
    if let Some(cursor) = &report.likes_last_cursor {
        println!("Last likes cursor: {cursor}");
    }

    if !report.likes_complete {
        println!(
            "{} likes collection incomplete; no mutations were attempted",
            "!".yellow()
        );
    } else if !report.authored_complete {
        println!(
            "{} post collection incomplete; deletions were skipped",
            "!".yellow()
        );
    }

    if dry_run {
        println!("Dry run: the account was left untouched.");
        return;
    }

    let execution = &report.execution;
    println!(
        "Removed {} like{}, deleted {} post{}, {} failure{}.",
        execution.unliked,
        plural(execution.unliked),
        execution.deleted,
        plural(execution.deleted),
        execution.failed,
        plural(execution.failed)
    );
    if report.is_success() {
        println!("{} sweep complete", "\u{2713}".green());
    } else {
        println!("{} sweep finished with problems", "\u{2717}".red());
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

//! Handler for the `check` subcommands.

use owo_colors::OwoColorize;

use crate::cli::ConfigPathArg;
use crate::config::Config;
use crate::error::Result;

/// Validate the configuration file and print the effective policy.
pub fn config(args: &ConfigPathArg) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.validate()?;

    println!("{} configuration valid", "\u{2713}".green());
    println!();
    println!("  Service:           {}", config.account.service);
    println!("  Identifier:        {}", config.account.identifier);
    match config.policy.max_reposts {
        0 => println!("  Max reposts:       disabled"),
        n => println!("  Max reposts:       {n}"),
    }
    match config.policy.stale_limit_days {
        0 => println!("  Stale limit:       disabled"),
        n => println!("  Stale limit:       {n} day{}", if n == 1 { "" } else { "s" }),
    }
    if config.policy.protected_domains.is_empty() {
        println!("  Protected domains: (none)");
    } else {
        println!(
            "  Protected domains: {}",
            config.policy.protected_domains.join(", ")
        );
    }
    if let Some(cursor) = &config.policy.fixed_likes_cursor {
        println!("  Likes cursor:      {cursor}");
    }
    println!("  Archive root:      {}", config.archive.root.display());
    println!();
    Ok(())
}

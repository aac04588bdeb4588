use clap::Parser;

use skysweep::cli::{check, run, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let success = match &cli.command {
        Commands::Run(args) => run::execute(args).await?,
        Commands::Check(CheckCommand::Config(args)) => {
            check::config(args)?;
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

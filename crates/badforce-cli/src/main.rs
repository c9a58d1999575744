//! BadForce CLI Entry Point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use badforce_cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => commands::execute_compare(args)?,
        Commands::Simulate(args) => commands::execute_simulate(args)?,
        Commands::Demo(args) => commands::execute_demo(args)?,
        Commands::Skeleton(args) => commands::execute_skeleton(args)?,
        Commands::Version => {
            println!("badforce {}", env!("CARGO_PKG_VERSION"));
            println!("core version: {}", badforce_core::VERSION);
            println!("analysis version: {}", badforce_analysis::VERSION);
        }
    }

    Ok(())
}

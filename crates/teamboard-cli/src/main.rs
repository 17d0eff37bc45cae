use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "teamboard", version, about = "Teamboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Team roster
    Member {
        #[command(subcommand)]
        action: commands::member::MemberAction,
    },
    /// Activity log
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Monthly FYC figures
    Revenue {
        #[command(subcommand)]
        action: commands::revenue::RevenueAction,
    },
    /// Leaderboards
    Board {
        #[command(subcommand)]
        action: commands::board::BoardAction,
    },
    /// Weekly incentive pool
    Incentive {
        #[command(subcommand)]
        action: commands::incentive::IncentiveAction,
    },
    /// Per-member notification feed
    Inbox {
        #[command(subcommand)]
        action: commands::inbox::InboxAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("TEAMBOARD_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Member { action } => commands::member::run(action),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Revenue { action } => commands::revenue::run(action),
        Commands::Board { action } => commands::board::run(action),
        Commands::Incentive { action } => commands::incentive::run(action),
        Commands::Inbox { action } => commands::inbox::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod error;

use commands::ConnectionArgs;
use error::CliResult;

#[derive(Parser)]
#[command(name = "campaign-access")]
#[command(about = "Campaign access CLI - token-gated campaign access on Solana")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Log client activity at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a campaign and mint its access token
    Mint {
        /// Payer keypair file; also the authority unless --authority is given
        #[arg(short, long)]
        keypair: PathBuf,

        /// Campaign YAML file; flags below override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        campaign_id: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long)]
        uri: Option<String>,

        #[arg(long)]
        agent_count: Option<u32>,

        /// Campaign authority and token recipient (defaults to the payer)
        #[arg(long)]
        authority: Option<String>,
    },

    /// Update a campaign's descriptive fields (authority only)
    Update {
        /// Authority keypair file
        #[arg(short, long)]
        keypair: PathBuf,

        campaign_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        symbol: Option<String>,

        #[arg(long)]
        uri: Option<String>,

        #[arg(long)]
        agent_count: Option<u32>,
    },

    /// Show a campaign record
    Show {
        campaign_id: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check whether a principal may access a campaign
    Verify {
        campaign_id: String,

        /// Claimant pubkey or keypair file
        #[arg(long)]
        claimant: String,

        /// Prove access with a ledger transaction (needs a keypair file)
        #[arg(long, conflicts_with = "simulate")]
        on_chain: bool,

        /// Dry-run the on-chain check without signing or paying fees
        #[arg(long)]
        simulate: bool,
    },

    /// List campaigns whose access token an owner holds
    List {
        /// Owner pubkey or keypair file
        owner: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let client = cli.connection.client()?;

    match cli.command {
        Commands::Mint {
            keypair,
            config,
            campaign_id,
            name,
            symbol,
            uri,
            agent_count,
            authority,
        } => {
            let overrides = config::MintOverrides {
                campaign_id,
                display_name: name,
                symbol,
                metadata_uri: uri,
                agent_count,
                authority,
            };
            commands::mint::execute(&client, keypair, config, overrides).await
        }

        Commands::Update {
            keypair,
            campaign_id,
            name,
            symbol,
            uri,
            agent_count,
        } => {
            commands::update::execute(
                &client,
                keypair,
                campaign_id,
                name,
                symbol,
                uri,
                agent_count,
            )
            .await
        }

        Commands::Show { campaign_id, json } => {
            commands::show::execute(&client, campaign_id, json).await
        }

        Commands::Verify {
            campaign_id,
            claimant,
            on_chain,
            simulate,
        } => {
            let mode = if on_chain {
                commands::verify::VerifyMode::OnChain
            } else if simulate {
                commands::verify::VerifyMode::Simulate
            } else {
                commands::verify::VerifyMode::OffChain
            };
            commands::verify::execute(&client, campaign_id, claimant, mode).await
        }

        Commands::List { owner } => commands::list::execute(&client, owner).await,
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("campaign_access_client=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

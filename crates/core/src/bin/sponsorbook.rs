use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sponsorbook::flows;
use sponsorbook::provider::RpcProvider;
use sponsorbook::view::ConsoleView;
use sponsorbook::{ClientConfig, ClientError, Session, SponsorshipContract};

#[derive(Parser)]
#[command(name = "sponsorbook", about = "Client for an on-chain sponsorship ledger")]
struct Cli {
    /// Wallet JSON-RPC endpoint (overrides SPONSORBOOK_RPC_URL).
    #[arg(long)]
    rpc_url: Option<String>,
    /// Sponsorship contract address (overrides SPONSORBOOK_CONTRACT_ADDRESS).
    #[arg(long)]
    contract: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List current sponsors.
    List,
    /// Sponsor under a name with an ETH amount attached.
    Sponsor { name: String, amount: String },
    /// Withdraw contract funds to the connected account.
    Withdraw,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.rpc_url {
        config.rpc_url = url;
    }
    if let Some(address) = cli.contract {
        config.contract_address = address;
    }

    if !config.is_provider_configured() {
        anyhow::bail!(
            "{} (set SPONSORBOOK_RPC_URL or pass --rpc-url)",
            ClientError::ProviderMissing
        );
    }

    let provider = Arc::new(RpcProvider::new(&config.rpc_url, config.http_timeout)?);
    let session = Session::connect(provider)
        .await
        .context("wallet connection failed")?;
    let contract = SponsorshipContract::new(config.contract_address.clone(), session);
    let view = ConsoleView;

    let outcome = async {
        // A successful connection always renders a fresh listing before
        // any action runs on top of it.
        flows::refresh_sponsors(&contract, &view).await?;
        match cli.command {
            Command::List => Ok(()),
            Command::Sponsor { name, amount } => {
                flows::submit_sponsorship(&contract, &view, &name, &amount).await
            }
            Command::Withdraw => flows::withdraw_funds(&contract, &view).await,
        }
    }
    .await;

    outcome.map_err(|error| {
        tracing::error!(%error, "flow failed");
        error.into()
    })
}

//! Create the payer's own associated token account for an existing mint.
//!
//! Standalone companion to the main pipeline: one idempotent account-creation
//! call, printing the derived address. The mint comes from the `MINT`
//! environment variable.

use std::str::FromStr;

use anyhow::{Context, Result};
use ruby_mint::{keys, token, PipelineConfig};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signer};
use tracing::{error, info, Level};

/// Mint used when `MINT` is not set.
const DEFAULT_MINT: &str = "CdTSKSumqhybzo2BpaQ6jwP6foFrP8XverwrFhCBJ7Sz";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    if let Err(err) = run().await {
        error!("account creation failed: {err:#}");
        std::process::exit(1);
    }
    info!("Finished successfully");
}

async fn run() -> Result<()> {
    let config = PipelineConfig::from_env()?;
    let mint_addr = std::env::var("MINT").unwrap_or_else(|_| DEFAULT_MINT.to_string());
    let mint = Pubkey::from_str(&mint_addr)
        .with_context(|| format!("MINT is not a valid base-58 address: {mint_addr}"))?;

    let payer = keys::load_keypair(&config.keypair_path)?;
    let client =
        RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    let provision =
        token::provision_recipient_account(&client, &payer, &payer.pubkey(), &mint).await?;
    println!("{}", provision.address);

    Ok(())
}

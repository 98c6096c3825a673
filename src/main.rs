//! Main entry point: provision the RUBY token on devnet.

use anyhow::Result;
use ruby_mint::pipeline;
use ruby_mint::storage::GatewayStore;
use ruby_mint::{keys, PipelineConfig};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signer};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    if let Err(err) = run().await {
        error!("token provisioning failed: {err:#}");
        std::process::exit(1);
    }
    info!("Finished successfully");
}

async fn run() -> Result<()> {
    let config = PipelineConfig::from_env()?;

    let payer = keys::load_keypair(&config.keypair_path)?;
    info!("payer public key: {}", payer.pubkey());

    let client =
        RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());
    let store = GatewayStore::new(&config.storage)?;

    let receipt = pipeline::provision_token(&client, &payer, &store, &config).await?;
    receipt.write(&config.cache_path)?;
    info!("wrote receipt to {}", config.cache_path.display());

    Ok(())
}

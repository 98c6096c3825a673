//! The straight-line provisioning sequence.
//!
//! Mint creation, recipient account, initial supply, asset uploads, and
//! metadata registration run strictly in order; the first error unwinds to the
//! caller and nothing already confirmed on chain is rolled back.

use std::fs;

use anyhow::{Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::{Keypair, Signer};
use tracing::info;

use crate::config::PipelineConfig;
use crate::metadata;
use crate::receipt::ProvisionReceipt;
use crate::storage::{upload_token_assets, AssetStore};
use crate::token;

fn explorer_tx_link(signature: &impl ToString) -> String {
    format!(
        "https://explorer.solana.com/tx/{}?cluster=devnet",
        signature.to_string()
    )
}

/// Run the full provisioning sequence and return the receipt for persistence.
pub async fn provision_token(
    client: &RpcClient,
    payer: &Keypair,
    store: &dyn AssetStore,
    config: &PipelineConfig,
) -> Result<ProvisionReceipt> {
    let (mint, _) = token::create_mint(client, payer, config.decimals).await?;

    let provision =
        token::provision_recipient_account(client, payer, &config.recipient, &mint).await?;
    if let Some(signature) = provision.signature {
        info!("token account transaction: {}", explorer_tx_link(&signature));
    }

    let amount = token::raw_amount(config.initial_supply, config.decimals);
    let mint_signature =
        token::mint_supply(client, payer, &mint, &provision.address, amount).await?;
    info!(
        "minted {} {} tokens: {}",
        config.initial_supply,
        config.token_symbol,
        explorer_tx_link(&mint_signature)
    );

    let image_name = config
        .image_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("token.png");
    let image_bytes = fs::read(&config.image_path)
        .with_context(|| format!("failed to read token image {}", config.image_path.display()))?;
    let (image_uri, metadata_uri) = upload_token_assets(
        store,
        &image_bytes,
        image_name,
        &config.token_name,
        &config.token_description,
    )
    .await?;

    let (metadata_address, metadata_signature) = metadata::register_metadata(
        client,
        payer,
        &mint,
        &config.token_name,
        &config.token_symbol,
        &metadata_uri,
    )
    .await?;
    info!(
        "metadata transaction: {}",
        explorer_tx_link(&metadata_signature)
    );
    info!("payer {} finished provisioning {}", payer.pubkey(), mint);

    Ok(ProvisionReceipt {
        mint: mint.to_string(),
        image_uri,
        metadata_uri,
        token_metadata: metadata_address.to_string(),
        metadata_transaction: metadata_signature.to_string(),
    })
}

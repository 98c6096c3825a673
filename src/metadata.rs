//! On-chain metadata registration through the Metaplex token-metadata program.

use anyhow::{Context, Result};
use mpl_token_metadata::{
    accounts::Metadata, instructions::CreateMetadataAccountV3Builder, types::DataV2,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::info;

/// Derive the metadata account address for a mint. Pure and deterministic;
/// the program derives the same address when validating the instruction.
pub fn find_metadata_address(mint: &Pubkey) -> Pubkey {
    Metadata::find_pda(mint).0
}

/// Create the metadata account for a mint, populated with name, symbol, and
/// the storage URI. The single keypair acts as mint authority, fee payer, and
/// update authority; royalties are zero and no creators, collection, or uses
/// are attached. The account is created mutable for future updates.
pub async fn register_metadata(
    client: &RpcClient,
    authority: &Keypair,
    mint: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
) -> Result<(Pubkey, Signature)> {
    let metadata_address = find_metadata_address(mint);

    let data = DataV2 {
        name: name.to_string(),
        symbol: symbol.to_string(),
        uri: uri.to_string(),
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };
    let create_metadata_ix = CreateMetadataAccountV3Builder::new()
        .metadata(metadata_address)
        .mint(*mint)
        .mint_authority(authority.pubkey())
        .payer(authority.pubkey())
        .update_authority(authority.pubkey(), true)
        .data(data)
        .is_mutable(true)
        .instruction();

    let recent_blockhash = client
        .get_latest_blockhash()
        .await
        .context("failed to fetch a recent blockhash")?;
    let transaction = Transaction::new_signed_with_payer(
        &[create_metadata_ix],
        Some(&authority.pubkey()),
        &[authority],
        recent_blockhash,
    );

    let signature = client
        .send_and_confirm_transaction(&transaction)
        .await
        .context("metadata account creation failed")?;
    info!("created metadata account {metadata_address}");

    Ok((metadata_address, signature))
}

//! Token program interactions: mint creation, associated-account provisioning,
//! and supply issuance.
//!
//! Each operation builds a single transaction, signs it with the payer, and
//! awaits confirmation before returning. Failures propagate to the runner;
//! there is no retry.

use anyhow::{bail, Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
    transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::state::Mint;
use tracing::info;

/// Scale a whole-token quantity into the raw minor units the mint tracks.
///
/// With 2 decimals, 100 whole tokens become 10_000 raw units.
pub fn raw_amount(major: u64, decimals: u8) -> u64 {
    major * 10u64.pow(u32::from(decimals))
}

/// Create a new token mint with the payer as mint authority and no freeze
/// authority. Returns the mint address and the confirmed signature.
pub async fn create_mint(
    client: &RpcClient,
    payer: &Keypair,
    decimals: u8,
) -> Result<(Pubkey, Signature)> {
    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();

    let rent = client
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await
        .context("failed to fetch rent-exempt minimum for the mint account")?;

    let create_account_ix = system_instruction::create_account(
        &payer.pubkey(),
        &mint,
        rent,
        Mint::LEN as u64,
        &spl_token::id(),
    );
    let initialize_mint_ix = spl_token::instruction::initialize_mint(
        &spl_token::id(),
        &mint,
        &payer.pubkey(),
        None,
        decimals,
    )
    .context("failed to build initialize_mint instruction")?;

    let recent_blockhash = client
        .get_latest_blockhash()
        .await
        .context("failed to fetch a recent blockhash")?;
    let transaction = Transaction::new_signed_with_payer(
        &[create_account_ix, initialize_mint_ix],
        Some(&payer.pubkey()),
        &[payer, &mint_keypair],
        recent_blockhash,
    );

    let signature = client
        .send_and_confirm_transaction(&transaction)
        .await
        .context("mint creation transaction failed")?;
    info!("created mint {mint}");

    Ok((mint, signature))
}

/// State of the associated token account before provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtaStatus {
    Missing,
    Exists,
}

/// Classify an account fetched at the derived associated address.
///
/// An account already present but owned by some other program cannot hold the
/// recipient's balance, so provisioning must abort rather than overwrite it.
pub fn ata_status(existing: Option<&Account>) -> Result<AtaStatus> {
    match existing {
        None => Ok(AtaStatus::Missing),
        Some(account) if account.owner == spl_token::id() => Ok(AtaStatus::Exists),
        Some(account) => bail!(
            "account at the associated address is owned by {}, not the token program",
            account.owner
        ),
    }
}

/// Result of provisioning the recipient's associated token account.
#[derive(Debug, Clone, Copy)]
pub struct AtaProvision {
    pub address: Pubkey,
    /// `None` when the account already existed and no transaction was sent.
    pub signature: Option<Signature>,
}

/// Derive the recipient's associated token account and create it if absent.
///
/// Creation is idempotent from the caller's perspective: when the account is
/// already in place the existing address is returned without submitting a
/// redundant transaction.
pub async fn provision_recipient_account(
    client: &RpcClient,
    payer: &Keypair,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<AtaProvision> {
    let address = get_associated_token_address(owner, mint);

    let existing = client
        .get_account_with_commitment(&address, client.commitment())
        .await
        .context("failed to query the associated token account")?
        .value;
    if ata_status(existing.as_ref())? == AtaStatus::Exists {
        info!("associated token account {address} already exists");
        return Ok(AtaProvision {
            address,
            signature: None,
        });
    }

    let create_ix =
        create_associated_token_account(&payer.pubkey(), owner, mint, &spl_token::id());
    let recent_blockhash = client
        .get_latest_blockhash()
        .await
        .context("failed to fetch a recent blockhash")?;
    let transaction = Transaction::new_signed_with_payer(
        &[create_ix],
        Some(&payer.pubkey()),
        &[payer],
        recent_blockhash,
    );

    let signature = client
        .send_and_confirm_transaction(&transaction)
        .await
        .context("associated token account creation failed")?;
    info!("created associated token account {address}");

    Ok(AtaProvision {
        address,
        signature: Some(signature),
    })
}

/// Mint a raw amount of tokens to the destination account. The signer must be
/// the mint's authority.
pub async fn mint_supply(
    client: &RpcClient,
    authority: &Keypair,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
) -> Result<Signature> {
    let mint_to_ix = spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        destination,
        &authority.pubkey(),
        &[],
        amount,
    )
    .context("failed to build mint_to instruction")?;

    let recent_blockhash = client
        .get_latest_blockhash()
        .await
        .context("failed to fetch a recent blockhash")?;
    let transaction = Transaction::new_signed_with_payer(
        &[mint_to_ix],
        Some(&authority.pubkey()),
        &[authority],
        recent_blockhash,
    );

    let signature = client
        .send_and_confirm_transaction(&transaction)
        .await
        .context("mint_to transaction failed")?;
    info!("minted {amount} raw units to {destination}");

    Ok(signature)
}

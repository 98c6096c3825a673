//! Tests for the provisioning pipeline building blocks.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use ruby_mint::keys::load_keypair;
use ruby_mint::metadata::find_metadata_address;
use ruby_mint::storage::{upload_token_assets, AssetStore};
use ruby_mint::ProvisionReceipt;
use solana_sdk::hash::hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use spl_associated_token_account::get_associated_token_address;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ruby-mint-{}-{}", std::process::id(), name))
}

#[test]
fn keypair_loads_deterministically_from_secret_bytes() {
    let keypair = Keypair::new();
    let path = temp_path("keypair.json");
    let bytes: Vec<u8> = keypair.to_bytes().to_vec();
    fs::write(&path, serde_json::to_string(&bytes).unwrap()).unwrap();

    let first = load_keypair(&path).expect("valid keypair file must load");
    let second = load_keypair(&path).expect("valid keypair file must load");
    assert_eq!(first.pubkey(), keypair.pubkey());
    assert_eq!(first.pubkey(), second.pubkey());

    let _ = fs::remove_file(&path);
}

#[test]
fn keypair_loader_rejects_wrong_length() {
    let path = temp_path("short-keypair.json");
    fs::write(&path, serde_json::to_string(&vec![7u8; 32]).unwrap()).unwrap();

    let err = load_keypair(&path).unwrap_err();
    assert!(err.to_string().contains("expected 64"));

    let _ = fs::remove_file(&path);
}

#[test]
fn keypair_loader_rejects_malformed_json() {
    let path = temp_path("bad-keypair.json");
    fs::write(&path, "not a byte array").unwrap();
    assert!(load_keypair(&path).is_err());
    let _ = fs::remove_file(&path);
}

#[test]
fn keypair_loader_fails_on_missing_file() {
    let path = temp_path("missing-keypair.json");
    let _ = fs::remove_file(&path);
    assert!(load_keypair(&path).is_err());
}

#[test]
fn associated_account_derivation_is_pure() {
    let owner = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    let first = get_associated_token_address(&owner, &mint);
    let second = get_associated_token_address(&owner, &mint);
    assert_eq!(first, second);

    // Same formula the associated-token program applies on chain.
    let (expected, _bump) = Pubkey::find_program_address(
        &[owner.as_ref(), spl_token::id().as_ref(), mint.as_ref()],
        &spl_associated_token_account::id(),
    );
    assert_eq!(first, expected);
}

#[test]
fn metadata_derivation_matches_between_calls() {
    let mint = Pubkey::new_unique();
    assert_eq!(find_metadata_address(&mint), find_metadata_address(&mint));
}

/// In-memory store double: content-addressed by sha256, records every upload.
struct MockStore {
    uploads: Mutex<Vec<(String, Vec<u8>, String)>>,
}

impl MockStore {
    fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssetStore for MockStore {
    async fn upload(&self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<String> {
        self.uploads.lock().unwrap().push((
            file_name.to_string(),
            bytes.to_vec(),
            content_type.to_string(),
        ));
        Ok(format!("mock://{}", hash(bytes)))
    }
}

#[tokio::test]
async fn content_addressed_uploads_are_idempotent() {
    let store = MockStore::new();
    let bytes = b"same image bytes";

    let first = store.upload(bytes, "a.png", "image/png").await.unwrap();
    let second = store.upload(bytes, "b.png", "image/png").await.unwrap();
    assert_eq!(first, second);

    let other = store.upload(b"other bytes", "a.png", "image/png").await.unwrap();
    assert_ne!(first, other);
}

#[tokio::test]
async fn metadata_document_embeds_the_image_uri() {
    let store = MockStore::new();
    let image_bytes = b"fake png";

    let (image_uri, metadata_uri) =
        upload_token_assets(&store, image_bytes, "jewel.png", "RUBY", "A very rare ruby token")
            .await
            .unwrap();
    assert!(!image_uri.is_empty());
    assert!(!metadata_uri.is_empty());

    let uploads = store.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0].0, "jewel.png");
    assert_eq!(uploads[1].0, "metadata.json");
    assert_eq!(uploads[1].2, "application/json");

    let document: serde_json::Value = serde_json::from_slice(&uploads[1].1).unwrap();
    assert_eq!(document["image"], image_uri);
    assert_eq!(document["name"], "RUBY");
    assert_eq!(document["description"], "A very rare ruby token");
}

#[test]
fn receipt_overwrites_the_cache_file_with_valid_addresses() {
    let path = temp_path("cache.json");
    fs::write(&path, "stale contents from a previous run").unwrap();

    let mint = Pubkey::new_unique();
    let receipt = ProvisionReceipt {
        mint: mint.to_string(),
        image_uri: "https://arweave.net/image".to_string(),
        metadata_uri: "https://arweave.net/metadata".to_string(),
        token_metadata: find_metadata_address(&mint).to_string(),
        metadata_transaction: "5".repeat(87),
    };
    receipt.write(&path).expect("receipt write must succeed");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in [
        "mint",
        "imageUri",
        "metadataUri",
        "tokenMetadata",
        "metadataTransaction",
    ] {
        assert!(
            !written[key].as_str().unwrap().is_empty(),
            "key {key} must be a non-empty string"
        );
    }

    // Addresses must round-trip through base-58 as 32-byte public keys.
    let mint_addr = Pubkey::from_str(written["mint"].as_str().unwrap()).unwrap();
    let metadata_addr = Pubkey::from_str(written["tokenMetadata"].as_str().unwrap()).unwrap();
    assert_eq!(mint_addr.to_bytes().len(), 32);
    assert_eq!(metadata_addr.to_bytes().len(), 32);

    let _ = fs::remove_file(&path);
}

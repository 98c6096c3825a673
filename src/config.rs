//! Pipeline configuration.
//!
//! Every endpoint, file path, and token constant the provisioning run needs is
//! collected here and passed down explicitly, so the sequence can be exercised
//! with fixtures instead of live network calls. Defaults target devnet and are
//! overridable through environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;

/// Devnet RPC endpoint used when `RPC_URL` is not set.
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Wallet receiving the initial supply when `RECIPIENT` is not set.
const DEFAULT_RECIPIENT: &str = "2VHGyT2AbGeK7ohNRFYXeQHU8LMgnqXBijazcEDpo2c9";

/// Storage gateway settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Upload node accepting the raw bytes.
    pub base_url: String,
    /// RPC endpoint the upload node settles against.
    pub provider_url: String,
    /// Public gateway the returned content ids resolve under.
    pub gateway_url: String,
    /// Request timeout for uploads, in seconds.
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://devnet.bundlr.network".to_string(),
            provider_url: DEVNET_RPC_URL.to_string(),
            gateway_url: "https://arweave.net".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Full configuration for one provisioning run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub rpc_url: String,
    /// JSON secret-key file for the payer / mint authority / update authority.
    pub keypair_path: PathBuf,
    /// Token display image uploaded to storage.
    pub image_path: PathBuf,
    /// Local snapshot of everything the run produced.
    pub cache_path: PathBuf,
    /// Wallet whose associated token account receives the initial supply.
    pub recipient: Pubkey,
    pub token_name: String,
    pub token_symbol: String,
    pub token_description: String,
    pub decimals: u8,
    /// Initial supply in whole tokens, scaled by `decimals` before minting.
    pub initial_supply: u64,
    pub storage: StorageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            keypair_path: PathBuf::from("test.json"),
            image_path: PathBuf::from("jewel.png"),
            cache_path: PathBuf::from("cache.json"),
            recipient: Pubkey::from_str(DEFAULT_RECIPIENT)
                .expect("default recipient is a valid base-58 address"),
            token_name: "RUBY".to_string(),
            token_symbol: "RUB".to_string(),
            token_description: "A very rare ruby token".to_string(),
            decimals: 2,
            initial_supply: 100,
            storage: StorageConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Build the configuration from defaults, applying environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("RPC_URL") {
            config.storage.provider_url = url.clone();
            config.rpc_url = url;
        }
        if let Ok(path) = env::var("KEYPAIR_PATH") {
            config.keypair_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("TOKEN_IMAGE_PATH") {
            config.image_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("CACHE_PATH") {
            config.cache_path = PathBuf::from(path);
        }
        if let Ok(addr) = env::var("RECIPIENT") {
            config.recipient = Pubkey::from_str(&addr)
                .with_context(|| format!("RECIPIENT is not a valid base-58 address: {addr}"))?;
        }
        if let Ok(url) = env::var("STORAGE_URL") {
            config.storage.base_url = url;
        }
        if let Ok(url) = env::var("STORAGE_GATEWAY_URL") {
            config.storage.gateway_url = url;
        }

        Ok(config)
    }
}

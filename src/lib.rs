//! ruby-mint - devnet token provisioning pipeline
//!
//! This crate creates a fungible token on the Solana devnet end to end: mint,
//! recipient token account, initial supply, content-addressed asset uploads,
//! and the Metaplex metadata account, with a local `cache.json` receipt.

pub mod config;
pub mod keys;
pub mod metadata;
pub mod pipeline;
pub mod receipt;
pub mod storage;
pub mod token;

// Re-export main types for convenience
pub use config::{PipelineConfig, StorageConfig};
pub use receipt::ProvisionReceipt;

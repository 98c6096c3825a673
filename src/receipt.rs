//! The local snapshot of a completed provisioning run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Everything a run produced, written to `cache.json` on success.
///
/// Field names serialize in camelCase to keep the file shape stable for
/// downstream readers; addresses are in base-58 text form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionReceipt {
    /// Mint address of the provisioned token.
    pub mint: String,
    /// Storage URI of the uploaded display image.
    pub image_uri: String,
    /// Storage URI of the uploaded metadata document.
    pub metadata_uri: String,
    /// Metadata account address derived from the mint.
    pub token_metadata: String,
    /// Signature of the metadata account creation transaction.
    pub metadata_transaction: String,
}

impl ProvisionReceipt {
    /// Overwrite `path` with the JSON serialization of this receipt.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("failed to serialize the provision receipt")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write receipt to {}", path.display()))
    }
}

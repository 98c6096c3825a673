//! Key material loading.
//!
//! The signing keypair lives in a local JSON file holding the raw secret key
//! as an array of integers, the format `solana-keygen` writes.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use solana_sdk::signature::Keypair;

/// Byte length of an ed25519 keypair file (secret + public half).
const SECRET_KEY_LEN: usize = 64;

/// Load a keypair from a JSON array-of-integers secret-key file.
///
/// Fails if the file is missing, is not a JSON byte array, or does not hold
/// exactly 64 bytes.
pub fn load_keypair(path: &Path) -> Result<Keypair> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read keypair file {}", path.display()))?;
    let bytes: Vec<u8> = serde_json::from_str(&contents)
        .with_context(|| format!("keypair file {} is not a JSON byte array", path.display()))?;
    if bytes.len() != SECRET_KEY_LEN {
        bail!(
            "keypair file {} holds {} bytes, expected {}",
            path.display(),
            bytes.len(),
            SECRET_KEY_LEN
        );
    }
    Keypair::from_bytes(&bytes)
        .with_context(|| format!("keypair file {} holds invalid key material", path.display()))
}

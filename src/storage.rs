//! Content-addressed asset storage.
//!
//! The pipeline pushes two documents to external storage: the token image and
//! a JSON metadata document embedding the image URI. `AssetStore` is the
//! formal contract for that operation, so tests can substitute an in-memory
//! double for the HTTP gateway.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::StorageConfig;

/// Contract for uploading a document to content-addressed storage.
///
/// The returned string is the URI the content resolves under. Uploading the
/// same bytes twice yields the same content-identifying portion.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct UploadResponse {
    id: String,
}

/// HTTP implementation of [`AssetStore`] against an upload node fronting a
/// content-addressed gateway.
pub struct GatewayStore {
    http: Client,
    base_url: String,
    gateway_url: String,
}

impl GatewayStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build the storage HTTP client")?;
        info!(
            "storage gateway {} settling via {}",
            config.base_url, config.provider_url
        );
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            gateway_url: config.gateway_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AssetStore for GatewayStore {
    async fn upload(&self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<String> {
        let url = format!("{}/upload/{}", self.base_url, file_name);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .with_context(|| format!("storage upload request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("storage gateway rejected the upload of {file_name}"))?;

        let upload: UploadResponse = response
            .json()
            .await
            .context("storage gateway returned a malformed upload response")?;
        Ok(format!("{}/{}", self.gateway_url, upload.id))
    }
}

/// Upload the token image, then a JSON metadata document embedding the image
/// URI. Returns `(image_uri, metadata_uri)`.
///
/// The two uploads are sequential; a metadata failure leaves the already
/// uploaded image behind as a benign leftover.
pub async fn upload_token_assets(
    store: &dyn AssetStore,
    image_bytes: &[u8],
    image_name: &str,
    name: &str,
    description: &str,
) -> Result<(String, String)> {
    let image_uri = store.upload(image_bytes, image_name, "image/png").await?;
    info!("uploaded token image: {image_uri}");

    let document = json!({
        "name": name,
        "description": description,
        "image": image_uri,
    });
    let metadata_uri = store
        .upload(document.to_string().as_bytes(), "metadata.json", "application/json")
        .await?;
    info!("uploaded token metadata document: {metadata_uri}");

    Ok((image_uri, metadata_uri))
}

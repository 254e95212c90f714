//! # Cloudinary Uploads
//!
//! Signed uploads to the Cloudinary Upload API.

use crate::config::CloudinaryConfig;
use crate::signature::sign_params;
use async_trait::async_trait;
use cellestial_core::{
    GatewayError, GatewayResult, MediaStrategy, Transformation, UploadOptions, UploadedAsset,
};
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "cloudinary";

/// Cloudinary upload strategy
pub struct CloudinaryUploadStrategy {
    config: CloudinaryConfig,
    client: Client,
}

impl CloudinaryUploadStrategy {
    /// Create a new Cloudinary upload strategy
    pub fn new(config: CloudinaryConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> GatewayResult<Self> {
        let config = CloudinaryConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    /// Parameters that are both sent and signed
    fn signed_params(options: &UploadOptions, timestamp: i64) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("timestamp".to_string(), timestamp.to_string());
        if !options.folder.is_empty() {
            params.insert("folder".to_string(), options.folder.clone());
        }
        if let Some(t) = &options.transformation {
            params.insert("transformation".to_string(), transformation_string(t));
        }
        params
    }
}

/// Render a transformation in URL syntax, e.g. `c_fill,h_300,w_300`
pub fn transformation_string(t: &Transformation) -> String {
    format!("c_{},h_{},w_{}", t.crop.as_str(), t.height, t.width)
}

#[async_trait]
impl MediaStrategy for CloudinaryUploadStrategy {
    #[instrument(skip(self, options), fields(folder = %options.folder))]
    async fn upload_image(
        &self,
        path: &Path,
        options: &UploadOptions,
    ) -> GatewayResult<UploadedAsset> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let params = Self::signed_params(options, Utc::now().timestamp());
        let signature = sign_params(
            &params,
            &self.config.api_secret,
            self.config.signature_algorithm,
        );

        debug!(
            "Uploading {} bytes to Cloudinary: cloud={}, params={:?}",
            bytes.len(),
            self.config.cloud_name,
            params
        );

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Cloudinary API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<CloudinaryErrorResponse>(&body) {
                return Err(GatewayError::provider(PROVIDER, error_response.error.message));
            }

            return Err(GatewayError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let asset: UploadedAsset = serde_json::from_str(&body).map_err(|e| {
            GatewayError::Serialization(format!("Failed to parse Cloudinary response: {}", e))
        })?;

        info!(
            "Stored Cloudinary asset: public_id={}, url={}",
            asset.public_id, asset.secure_url
        );

        Ok(asset)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorResponse {
    error: CloudinaryError,
}

#[derive(Debug, Deserialize)]
struct CloudinaryError {
    message: String,
}

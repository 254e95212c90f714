//! # Media Strategy Trait
//!
//! Strategy trait for media storage/transformation providers, plus the
//! upload options and asset types they exchange with the API layer.

use crate::error::GatewayResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// How the provider fits an image into the requested box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Resize and crop to fill the box exactly (center gravity)
    #[default]
    Fill,
}

impl CropMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fill => "fill",
        }
    }
}

/// Resize/crop requested from the provider at upload time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub width: u32,
    pub height: u32,
    pub crop: CropMode,
}

impl Transformation {
    /// Square center-crop of the given edge length
    pub fn square_fill(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            crop: CropMode::Fill,
        }
    }
}

/// Options for a single upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Provider-side folder the asset is stored under
    pub folder: String,
    /// Eager transformation applied to the stored asset
    pub transformation: Option<Transformation>,
}

impl UploadOptions {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            transformation: None,
        }
    }

    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = Some(transformation);
        self
    }
}

/// An asset stored by the media provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Public HTTPS URL of the stored asset
    pub secure_url: String,
    /// Provider-side identifier
    pub public_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

impl UploadedAsset {
    pub fn new(secure_url: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            secure_url: secure_url.into(),
            public_id: public_id.into(),
            width: None,
            height: None,
            format: None,
            bytes: None,
        }
    }
}

/// Core trait for media provider implementations.
#[async_trait]
pub trait MediaStrategy: Send + Sync {
    /// Upload the file at `path` and return the stored asset.
    ///
    /// The caller owns `path`; implementations must not remove it.
    async fn upload_image(&self, path: &Path, options: &UploadOptions)
        -> GatewayResult<UploadedAsset>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared media strategy (dynamic dispatch)
pub type BoxedMediaStrategy = Arc<dyn MediaStrategy>;

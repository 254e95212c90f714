//! # cellestial-cloudinary
//!
//! Cloudinary media strategy for the Cellestial backend.
//!
//! Files are sent to the Upload API as signed multipart requests; the
//! requested transformation is applied by Cloudinary before the asset is
//! stored.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cellestial_cloudinary::CloudinaryUploadStrategy;
//! use cellestial_core::{MediaStrategy, Transformation, UploadOptions};
//!
//! let strategy = CloudinaryUploadStrategy::from_env()?;
//! let options = UploadOptions::new("avatars")
//!     .with_transformation(Transformation::square_fill(300));
//!
//! let asset = strategy.upload_image(&path, &options).await?;
//! println!("{}", asset.secure_url);
//! ```

pub mod config;
pub mod signature;
pub mod upload;

// Re-exports
pub use config::CloudinaryConfig;
pub use signature::SignatureAlgorithm;
pub use upload::CloudinaryUploadStrategy;

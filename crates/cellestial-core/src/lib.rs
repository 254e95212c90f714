//! # cellestial-core
//!
//! Core types and traits for the Cellestial backend.
//!
//! This crate provides:
//! - `PaymentStrategy` trait for hosted-checkout providers
//! - `MediaStrategy` trait for media storage providers
//! - `CartItem`, `Order` and `CheckoutSession` for the checkout flow
//! - `UploadOptions` and `UploadedAsset` for the upload flow
//! - `GatewayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cellestial_core::{CartItem, CheckoutUrls, Currency, Order, PaymentStrategy};
//!
//! let cart = vec![CartItem::new("Star map", 19.99, 2)];
//! let order = Order::from_cart(&cart, Currency::EUR);
//!
//! let session = strategy
//!     .create_checkout(&order, &CheckoutUrls::new("https://shop.example"))
//!     .await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod error;
pub mod media;
pub mod order;
pub mod price;
pub mod strategy;

// Re-exports for convenience
pub use error::{GatewayError, GatewayResult, MISSING_UPLOAD_MESSAGE};
pub use media::{
    BoxedMediaStrategy, CropMode, MediaStrategy, Transformation, UploadOptions, UploadedAsset,
};
pub use order::{CartItem, CheckoutSession, LineItem, Order};
pub use price::{Currency, Price};
pub use strategy::{BoxedPaymentStrategy, CheckoutUrls, PaymentStrategy};

//! # cellestial-stripe
//!
//! Stripe payment strategy for the Cellestial backend.
//!
//! **StripeCheckoutStrategy** talks to the Checkout Sessions API:
//! - Dynamic line items built from the posted cart
//! - One-time card payments on Stripe's hosted page
//! - Redirects back to the storefront on success or cancel
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cellestial_stripe::StripeCheckoutStrategy;
//! use cellestial_core::{CheckoutUrls, PaymentStrategy};
//!
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! let session = strategy
//!     .create_checkout(&order, &CheckoutUrls::new("https://shop.example"))
//!     .await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;

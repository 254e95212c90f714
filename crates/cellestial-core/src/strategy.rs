//! # Payment Strategy Trait
//!
//! Strategy trait for hosted-checkout payment providers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentStrategy (trait)                  │
//! │  ├── create_checkout()                                      │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                 ┌──────────┴──────────┐
//!          ┌──────┴────────┐     ┌──────┴───────┐
//!          │StripeCheckout │     │  test double │
//!          │   Strategy    │     │              │
//!          └───────────────┘     └──────────────┘
//! ```

use crate::error::GatewayResult;
use crate::order::{CheckoutSession, Order};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a hosted checkout session and return the redirect URL.
    ///
    /// # Arguments
    /// * `order` - The order to check out
    /// * `urls` - Where the provider sends the customer afterwards
    async fn create_checkout(
        &self,
        order: &Order,
        urls: &CheckoutUrls,
    ) -> GatewayResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

/// Redirect targets handed to the payment provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    /// Base URL of the storefront (e.g., "https://cellestial-frontend.vercel.app")
    pub base_url: String,
    /// Success page path
    pub success_path: String,
    /// Cancel page path
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            success_path: "/payment-success".to_string(),
            cancel_path: "/checkout".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:5173")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_urls() {
        let urls = CheckoutUrls::new("https://cellestial-frontend.vercel.app");

        assert_eq!(
            urls.success_url(),
            "https://cellestial-frontend.vercel.app/payment-success"
        );
        assert_eq!(
            urls.cancel_url(),
            "https://cellestial-frontend.vercel.app/checkout"
        );
    }

    #[test]
    fn test_checkout_urls_trailing_slash() {
        let urls = CheckoutUrls::new("http://localhost:5173/");
        assert_eq!(urls.success_url(), "http://localhost:5173/payment-success");
        assert_eq!(CheckoutUrls::default(), urls);
    }
}

//! # Cellestial Server
//!
//! Checkout and avatar upload backend for the Cellestial storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env / $ENV_FILE)
//! export STRIPE_SECRET_KEY=sk_test_...
//! export CLOUDINARY_URL=cloudinary://<api_key>:<api_secret>@<cloud_name>
//! export FRONTEND_URL=http://localhost:5173
//!
//! # Run the server
//! cellestial-server
//! ```

use cellestial_api::{logging, routes, state};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    state::load_env_file()?;
    let config = state::AppConfig::from_env()?;

    logging::init(config.log_format);

    print_banner();

    let state = state::AppState::from_env(config)?;

    tokio::fs::create_dir_all(&state.config.upload_dir).await?;

    let addr = state.config.display_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Providers: payments={}, media={}",
        state.payments.provider_name(),
        state.media.provider_name()
    );
    info!("Allowed origins: {:?}", state.config.allowed_origins);
    info!("Upload directory: {}", state.config.upload_dir.display());

    let listener =
        tokio::net::TcpListener::bind((state.config.host.as_str(), state.config.port)).await?;

    // Create router
    let app = routes::create_router(state);

    info!("🚀 Cellestial API listening on http://{}", addr);

    if !is_prod {
        info!("💳 Checkout: POST http://{}/create-checkout-session", addr);
        info!("🖼️  Avatar: POST http://{}/api/upload-avatar", addr);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🛰️  Cellestial API
  ━━━━━━━━━━━━━━━━━━━━━━━
  Checkout & avatar backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}

//! House of Books application library
//!
//! Wires the `books` and `user` modules into the bookhouse framework and runs
//! the HTTP server.

use anyhow::Context;
use bookhouse_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

/// Re-export commonly used types
pub use modules::*;

/// Create a registry holding every application module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;
    Ok(registry)
}

/// Run the application until a shutdown signal arrives
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookhouse_http::start_server(&registry, &settings).await;

    registry.stop_all().await?;
    served
}

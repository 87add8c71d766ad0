use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::ApiSettings;
use crate::config::StaticConfig;
use crate::services::CodeRegistry;
use crate::storage::StoreFactory;

pub struct StartupContext {
    pub registry: Arc<CodeRegistry>,
    pub api_settings: ApiSettings,
}

/// 准备服务器启动的上下文
///
/// Connects the configured store once and hands it to the registry.
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StoreFactory::create(&config.store)
        .await
        .context("Failed to create mapping store")?;
    info!("Using store backend: {}", store.backend_name());

    let registry = Arc::new(CodeRegistry::new(store));

    let api_settings = ApiSettings {
        stage: config.server.stage.clone(),
    };

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        registry,
        api_settings,
    })
}

//! # Strata Server
//!
//! Loads configuration, wires repository → user service → cache decorator
//! and runs until a shutdown signal arrives.

use std::sync::Arc;
use strata_config::{AppConfig, ConfigLoader};
use strata_core::telemetry::init_tracing;
use strata_core::{StrataError, StrataResult};
use strata_repository::InMemoryUserRepository;
use strata_service::bootstrap::build_user_service;
use strata_service::UserService;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(code = e.error_code(), "Application error: {}", e);
        eprintln!("strata-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> StrataResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_tracing(&config.observability)?;

    info!("Starting Strata Server...");
    info!("Version: {}", config.app.version);
    info!("Environment: {}", config.app.environment);

    let _user_service = build_stack(&config)?;

    info!("Strata ready");
    shutdown_signal().await?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_stack(config: &AppConfig) -> StrataResult<Arc<dyn UserService>> {
    if !config.storage.in_memory {
        return Err(StrataError::Configuration(
            "storage.in_memory is false but no other storage backend is available".to_string(),
        ));
    }

    let repository = Arc::new(InMemoryUserRepository::new());
    build_user_service(config, repository)
}

async fn shutdown_signal() -> StrataResult<()> {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .map_err(|e| StrataError::Internal(format!("Failed to install Ctrl+C handler: {}", e)))
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(|e| StrataError::Internal(format!("Failed to install signal handler: {}", e)))?
            .recv()
            .await;
        Ok::<(), StrataError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<StrataResult<()>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("Received Ctrl+C, shutting down...");
        }
        result = terminate => {
            result?;
            info!("Received terminate signal, shutting down...");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_stack_with_defaults() {
        assert!(build_stack(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_build_stack_rejects_missing_backend() {
        let mut config = AppConfig::default();
        config.storage.in_memory = false;
        let err = build_stack(&config).err().unwrap();
        assert!(matches!(err, StrataError::Configuration(_)));
    }
}

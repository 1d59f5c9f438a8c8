//! # Surplus Market Backend
//!
//! Vendor availability storage and impact estimates for the surplus-food bag
//! marketplace.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST handlers, DTO mapping)
//!     ↓
//! Domain Layer (services, validation)  →  shared (pure impact pipeline)
//!     ↓
//! Storage Layer (YAML files or in-memory map, impact config provider)
//! ```
//!
//! Storage and configuration are injected into the services as trait
//! objects, chosen once from [`config::AppConfig`] at start-up.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::domain::{AvailabilityService, ImpactService};
use crate::storage::{
    AvailabilityStorage, ImpactConfigProvider, InMemoryAvailabilityRepository,
    StaticImpactConfigProvider, YamlAvailabilityRepository, YamlConnection,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub availability_service: AvailabilityService,
    pub impact_service: ImpactService,
}

/// Build storage and services from the configuration
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up {:?} storage", config.storage);
    let storage: Arc<dyn AvailabilityStorage> = match config.storage {
        StorageBackend::Yaml => {
            let data_directory = config.resolved_data_directory()?;
            info!("Using data directory {}", data_directory.display());
            let connection = YamlConnection::new(&data_directory)?;
            Arc::new(YamlAvailabilityRepository::new(connection))
        }
        StorageBackend::Memory if config.seed_demo_data => {
            info!("Seeding in-memory store with demo vendors");
            Arc::new(InMemoryAvailabilityRepository::with_demo_data())
        }
        StorageBackend::Memory => Arc::new(InMemoryAvailabilityRepository::new()),
    };

    let config_provider: Arc<dyn ImpactConfigProvider> =
        Arc::new(StaticImpactConfigProvider::new(config.impact.clone()));

    info!("Setting up domain services");
    let availability_service = AvailabilityService::new(storage);
    let impact_service = ImpactService::new(availability_service.clone(), config_provider);

    Ok(AppState {
        availability_service,
        impact_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let cors = if cors_origin == "*" {
        cors.allow_origin(Any)
    } else {
        let origin = cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;
        cors.allow_origin(origin)
    };

    Ok(Router::new()
        .nest("/api", io::rest::router())
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_yaml_backend_creates_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let data_directory = temp_dir.path().join("data");
        let config = AppConfig {
            data_directory: Some(data_directory.clone()),
            ..AppConfig::default()
        };

        initialize_backend(&config).unwrap();
        assert!(data_directory.is_dir());
    }

    #[tokio::test]
    async fn test_seeded_memory_backend_lists_demo_vendors() {
        let config = AppConfig {
            storage: StorageBackend::Memory,
            seed_demo_data: true,
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).unwrap();

        let listed = state.availability_service.list_availabilities().await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn test_create_router_rejects_bad_origin() {
        let config = AppConfig {
            storage: StorageBackend::Memory,
            ..AppConfig::default()
        };
        let state = initialize_backend(&config).unwrap();

        assert!(create_router(state.clone(), "*").is_ok());
        assert!(create_router(state, "bad\norigin").is_err());
    }
}

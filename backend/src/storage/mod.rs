//! # Storage Module
//!
//! Persistence for vendor schedules and the source of impact configuration.
//!
//! The domain layer only sees the traits in [`traits`]; which implementation
//! backs them is decided once at start-up from the application config.
//!
//! ## Implementations
//!
//! - **yaml**: one `availability.yaml` per vendor under the data directory
//! - **memory**: process-local map, optionally seeded with demo vendors
//! - **impact_config**: fixed conversion factors for every vendor

pub mod impact_config;
pub mod memory;
pub mod traits;
pub mod yaml;

pub use impact_config::StaticImpactConfigProvider;
pub use memory::InMemoryAvailabilityRepository;
pub use traits::{AvailabilityStorage, ImpactConfigProvider};
pub use yaml::{YamlAvailabilityRepository, YamlConnection};

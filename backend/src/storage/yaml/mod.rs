//! # YAML Storage Module
//!
//! File-based storage: one directory per vendor under the configured data
//! directory, each holding human-readable YAML documents written atomically.

pub mod availability_repository;
pub mod connection;

pub use availability_repository::YamlAvailabilityRepository;
pub use connection::YamlConnection;

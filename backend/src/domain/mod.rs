//! # Domain Module
//!
//! Business logic for vendor availability and impact estimates.
//!
//! The services here sit between the REST layer and storage. They validate
//! input, apply timestamps, and call into the pure pipeline in the `shared`
//! crate (aggregate, estimate, format, redistribute).
//!
//! ## Module Organization
//!
//! - **availability_service**: CRUD for vendor schedules and applying a bag target
//! - **impact_service**: impact estimates for stored or unsaved schedules
//! - **commands**: internal command/result types
//! - **models**: stored records and validation errors

pub mod availability_service;
pub mod commands;
pub mod impact_service;
pub mod models;

pub use availability_service::*;
pub use impact_service::*;

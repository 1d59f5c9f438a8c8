//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Handlers translate JSON requests into domain commands, call the services
//! held in [`crate::AppState`], and translate results (or errors) back into
//! JSON responses with appropriate status codes.

pub mod rest;

pub use rest::*;

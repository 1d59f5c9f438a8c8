//! Mappers between domain types and the DTOs in the `shared` crate.

pub mod availability_mapper;
pub mod impact_mapper;

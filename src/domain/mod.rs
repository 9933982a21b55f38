//! Domain layer - core business logic

pub mod execution;

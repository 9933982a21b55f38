//! Infrastructure layer - external systems

pub mod blockchain;

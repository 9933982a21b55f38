//! Swap aggregator integrations

pub mod api_clients;

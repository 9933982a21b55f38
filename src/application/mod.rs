//! Application layer - context and HTTP surface

pub mod context;
pub mod server;

pub use context::AppContext;
pub use server::create_router;

//! Execution domain - swap execution and its operation log

mod operation_log;
mod swap_executor;

pub use operation_log::OperationLog;
pub use swap_executor::{decode_transaction, SwapExecutor, SwapSettings};

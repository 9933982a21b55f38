//! Utility functions and helpers

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Format amount with proper decimals
pub fn format_amount(amount: u64, decimals: u8) -> String {
    let value = amount as f64 / 10_f64.powi(decimals as i32);
    format!("{}", value)
}

/// Convert a decimal SOL amount into lamports, rounding to the nearest lamport
pub fn sol_to_lamports(sol: f64) -> Option<u64> {
    if !sol.is_finite() || sol < 0.0 {
        return None;
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports >= u64::MAX as f64 {
        return None;
    }
    Some(lamports as u64)
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

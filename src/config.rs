use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;
use crate::shared::utils::sol_to_lamports;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_MIN_BALANCE_LAMPORTS: u64 = 5_000;
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 60;

/// Environment variables that must be present at startup
pub const REQUIRED_VARS: [&str; 9] = [
    "RPC_URL",
    "PRIVATE_KEY_SOLFLAIRE",
    "JUPITER_URL_QUOTE",
    "JUPITER_URL_SWAP",
    "INPUT_MINT",
    "OUTPUT_MINT",
    "AMOUNT_SOL",
    "SLIPPAGE",
    "PORT",
];

/// Process-wide configuration, loaded once at startup
#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    pub quote_url: String,
    pub swap_url: String,
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount_lamports: u64,
    pub slippage_bps: u16,
    pub host: String,
    pub port: u16,
    pub min_balance_lamports: u64,
    pub rpc_accept_invalid_certs: bool,
    pub confirm_timeout_secs: u64,
    pub serialize_swaps: bool,
}

/// Prints every field except the secret key
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("quote_url", &self.quote_url)
            .field("swap_url", &self.swap_url)
            .field("input_mint", &self.input_mint)
            .field("output_mint", &self.output_mint)
            .field("amount_lamports", &self.amount_lamports)
            .field("slippage_bps", &self.slippage_bps)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("min_balance_lamports", &self.min_balance_lamports)
            .field("rpc_accept_invalid_certs", &self.rpc_accept_invalid_certs)
            .field("confirm_timeout_secs", &self.confirm_timeout_secs)
            .field("serialize_swaps", &self.serialize_swaps)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// All missing required variables are reported together. Empty values count
    /// as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .collect();
        match missing.len() {
            0 => {}
            1 => {
                return Err(AppError::ConfigError(format!(
                    "{} environment variable is not set",
                    missing[0]
                )))
            }
            _ => {
                return Err(AppError::ConfigError(format!(
                    "{} environment variables are not set",
                    missing.join(", ")
                )))
            }
        }

        let required = |name: &str| get(name).map(|v| v.trim().to_string()).unwrap_or_default();

        let amount_sol: f64 = parse_var("AMOUNT_SOL", &required("AMOUNT_SOL"))?;
        let amount_lamports = sol_to_lamports(amount_sol)
            .filter(|lamports| *lamports > 0)
            .ok_or_else(|| {
                AppError::ConfigError(format!("AMOUNT_SOL must be a positive amount, got {}", amount_sol))
            })?;

        Ok(Self {
            rpc_url: required("RPC_URL"),
            private_key: required("PRIVATE_KEY_SOLFLAIRE"),
            quote_url: required("JUPITER_URL_QUOTE"),
            swap_url: required("JUPITER_URL_SWAP"),
            input_mint: parse_pubkey("INPUT_MINT", &required("INPUT_MINT"))?,
            output_mint: parse_pubkey("OUTPUT_MINT", &required("OUTPUT_MINT"))?,
            amount_lamports,
            slippage_bps: parse_var("SLIPPAGE", &required("SLIPPAGE"))?,
            port: parse_var("PORT", &required("PORT"))?,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            min_balance_lamports: optional_var(&get, "MIN_BALANCE_LAMPORTS", DEFAULT_MIN_BALANCE_LAMPORTS)?,
            rpc_accept_invalid_certs: optional_var(&get, "RPC_ACCEPT_INVALID_CERTS", false)?,
            confirm_timeout_secs: optional_var(&get, "CONFIRM_TIMEOUT_SECS", DEFAULT_CONFIRM_TIMEOUT_SECS)?,
            serialize_swaps: optional_var(&get, "SERIALIZE_SWAPS", true)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e| AppError::ConfigError(format!("Invalid {} value '{}': {}", name, value, e)))
}

fn parse_pubkey(name: &str, value: &str) -> Result<Pubkey, AppError> {
    Pubkey::from_str(value)
        .map_err(|e| AppError::ConfigError(format!("Invalid {} address '{}': {}", name, value, e)))
}

fn optional_var<T, G>(get: &G, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(value) => parse_var(name, value.trim()),
        None => Ok(default),
    }
}

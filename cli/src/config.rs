//! CLI configuration (TOML) and well-known simulation addresses

use anyhow::{Context, Result};
use reservoir::{Address, VaultParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::SimState;

/// Default config location, used only if it exists
const DEFAULT_CONFIG: &str = "~/.config/reservoir/config.toml";

/// Default state file, relative to the working directory
const DEFAULT_STATE: &str = "reservoir-state.json";

/// Fixed addresses of the simulated deployment
pub const CONTRACT_LABEL: &str = "reservoir";
pub const RESERVE_LABEL: &str = "usd";
pub const ROUTER_LABEL: &str = "router";
pub const PAIR_LABEL: &str = "pair";

pub fn label(name: &str) -> Result<Address> {
    Address::from_label(name).with_context(|| format!("Invalid label: {name}"))
}

/// Overrides for the vault parameters. Amounts are raw base units.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamOverrides {
    pub issuance_window_secs: Option<u64>,
    pub fee_bps: Option<u64>,
    pub min_fee: Option<u64>,
    pub min_transfer: Option<u64>,
    pub min_liquidity: Option<u64>,
    pub min_output_percent: Option<u64>,
    pub swap_deadline_secs: Option<u64>,
}

impl ParamOverrides {
    pub fn apply(&self, mut params: VaultParams) -> VaultParams {
        if let Some(v) = self.issuance_window_secs {
            params.issuance_window_secs = v;
        }
        if let Some(v) = self.fee_bps {
            params.fee_bps = v.into();
        }
        if let Some(v) = self.min_fee {
            params.min_fee = v.into();
        }
        if let Some(v) = self.min_transfer {
            params.min_transfer = v.into();
        }
        if let Some(v) = self.min_liquidity {
            params.min_liquidity = v.into();
        }
        if let Some(v) = self.min_output_percent {
            params.min_output_percent = v.into();
        }
        if let Some(v) = self.swap_deadline_secs {
            params.swap_deadline_secs = v;
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Where the simulated chain state lives
    pub state_file: String,

    /// Fee of the simulated constant-product venue
    pub venue_fee_bps: u64,

    /// Token display name and symbol
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,

    pub params: ParamOverrides,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: DEFAULT_STATE.to_string(),
            venue_fee_bps: 30,
            token_name: None,
            token_symbol: None,
            params: ParamOverrides::default(),
        }
    }
}

impl CliConfig {
    /// Load `path`, or the default location if present, or built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = expand(DEFAULT_CONFIG);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn state_path(&self, override_path: Option<&Path>) -> PathBuf {
        match override_path {
            Some(p) => p.to_path_buf(),
            None => expand(&self.state_file),
        }
    }
}

/// Resolved config plus the state file it points at
#[derive(Debug, Clone)]
pub struct Session {
    pub config: CliConfig,
    pub state_path: PathBuf,
    pub verbose: bool,
}

impl Session {
    pub fn new(config: CliConfig, state_override: Option<&Path>, verbose: bool) -> Self {
        let state_path = config.state_path(state_override);
        Self {
            config,
            state_path,
            verbose,
        }
    }

    pub fn load_state(&self) -> Result<SimState> {
        SimState::load(&self.state_path)
    }

    pub fn save_state(&self, state: &SimState) -> Result<()> {
        state.save(&self.state_path)
    }
}

/// Expand `~` and environment variables
pub fn expand(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.params.apply(VaultParams::default()), VaultParams::default());
    }

    #[test]
    fn test_overrides_applied() {
        let config = CliConfig::parse(
            r#"
            state_file = "/tmp/sim.json"
            venue_fee_bps = 25

            [params]
            issuance_window_secs = 3600
            min_fee = 1
            "#,
        )
        .unwrap();

        let params = config.params.apply(VaultParams::default());
        assert_eq!(params.issuance_window_secs, 3600);
        assert_eq!(params.min_fee, 1);
        assert_eq!(params.fee_bps, 450);
        assert_eq!(config.venue_fee_bps, 25);
        assert_eq!(config.state_path(None), PathBuf::from("/tmp/sim.json"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(CliConfig::parse("fee = 5").is_err());
    }
}

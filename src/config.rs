//! Immutable vault configuration

use serde::{Deserialize, Serialize};

use crate::error::{ReservoirError, Result};
use crate::types::{Address, Amount};
use reservoir_model::{BPS_SCALE, FEE_BPS, MIN_OUTPUT_PERCENT};

/// Issuance window: 180 days
pub const ISSUANCE_WINDOW_SECS: u64 = 180 * 24 * 60 * 60;

/// Deadline handed to the swap venue, relative to the call time
pub const SWAP_DEADLINE_SECS: u64 = 5 * 60;

/// Smallest transfer accepted by the ledger
pub const MIN_TRANSFER: Amount = 1_000;

/// Smallest fee actually charged (1e-6 token)
pub const MIN_FEE: Amount = 1_000_000_000_000;

/// Smallest issuance deposit (1e-3 reserve asset)
pub const MIN_LIQUIDITY: Amount = 1_000_000_000_000_000;

/// Display metadata for the ledger token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Reservoir".to_string(),
            symbol: "RSV".to_string(),
            decimals: 18,
        }
    }
}

/// Economic parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultParams {
    /// Seconds after deployment during which shares can be issued
    pub issuance_window_secs: u64,

    /// Transfer and issuance fee in basis points (450 = 4.5%)
    pub fee_bps: u128,

    /// Fees below this are waived on transfers and rejected on issuance
    pub min_fee: Amount,

    /// Minimum taxed-transfer amount
    pub min_transfer: Amount,

    /// Minimum issuance deposit
    pub min_liquidity: Amount,

    /// Percent of the reserve-refined estimate required from a swap
    pub min_output_percent: u128,

    /// Swap deadline offset in seconds
    pub swap_deadline_secs: u64,
}

impl Default for VaultParams {
    fn default() -> Self {
        Self {
            issuance_window_secs: ISSUANCE_WINDOW_SECS,
            fee_bps: FEE_BPS,
            min_fee: MIN_FEE,
            min_transfer: MIN_TRANSFER,
            min_liquidity: MIN_LIQUIDITY,
            min_output_percent: MIN_OUTPUT_PERCENT,
            swap_deadline_secs: SWAP_DEADLINE_SECS,
        }
    }
}

/// Set once at deployment, never mutated afterwards
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Privileged deployer: receives fee shares, may set the pair
    pub controller: Address,

    /// The contract's own account (also the ledger token id)
    pub contract: Address,

    /// Reserve asset backing redemptions
    pub reserve_asset: Address,

    /// Router of the swap venue
    pub swap_venue: Address,

    /// Deployment timestamp (seconds)
    pub deployed_at: u64,

    #[serde(default)]
    pub params: VaultParams,

    #[serde(default)]
    pub metadata: TokenMetadata,
}

impl VaultConfig {
    pub fn new(
        controller: Address,
        contract: Address,
        reserve_asset: Address,
        swap_venue: Address,
        deployed_at: u64,
    ) -> Self {
        Self {
            controller,
            contract,
            reserve_asset,
            swap_venue,
            deployed_at,
            params: VaultParams::default(),
            metadata: TokenMetadata::default(),
        }
    }

    pub fn with_params(mut self, params: VaultParams) -> Self {
        self.params = params;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let addresses = [
            ("controller", self.controller),
            ("contract", self.contract),
            ("reserve_asset", self.reserve_asset),
            ("swap_venue", self.swap_venue),
        ];
        for (name, address) in addresses {
            if address.is_zero() {
                return Err(ReservoirError::InvalidConfig(format!("{name} is the zero address")));
            }
        }
        if self.controller == self.contract {
            return Err(ReservoirError::InvalidConfig(
                "controller and contract must differ".to_string(),
            ));
        }

        let p = &self.params;
        if p.fee_bps > BPS_SCALE {
            return Err(ReservoirError::InvalidConfig(format!("fee_bps {} exceeds 10000", p.fee_bps)));
        }
        if p.min_output_percent > 100 {
            return Err(ReservoirError::InvalidConfig(format!(
                "min_output_percent {} exceeds 100",
                p.min_output_percent
            )));
        }
        if p.issuance_window_secs == 0 {
            return Err(ReservoirError::InvalidConfig("issuance window is empty".to_string()));
        }
        if p.min_transfer == 0 || p.min_liquidity == 0 {
            return Err(ReservoirError::InvalidConfig("floors must be non-zero".to_string()));
        }
        self.issuance_ends_at()?;
        Ok(())
    }

    /// Last second at which issuance is still accepted
    pub fn issuance_ends_at(&self) -> Result<u64> {
        self.deployed_at
            .checked_add(self.params.issuance_window_secs)
            .ok_or(ReservoirError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(label: &str) -> Address {
        Address::from_label(label).unwrap()
    }

    fn config() -> VaultConfig {
        VaultConfig::new(addr("controller"), addr("contract"), addr("reserve"), addr("venue"), 1_000)
    }

    #[test]
    fn test_defaults() {
        let params = VaultParams::default();
        assert_eq!(params.fee_bps, 450);
        assert_eq!(params.min_output_percent, 90);
        assert_eq!(params.swap_deadline_secs, 300);
        assert_eq!(params.issuance_window_secs, 15_552_000);
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_issuance_deadline() {
        assert_eq!(config().issuance_ends_at(), Ok(1_000 + 15_552_000));
    }

    #[test]
    fn test_rejects_zero_addresses() {
        let mut cfg = config();
        cfg.reserve_asset = Address::ZERO;
        assert!(matches!(cfg.validate(), Err(ReservoirError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_params() {
        let cfg = config().with_params(VaultParams { fee_bps: 10_001, ..VaultParams::default() });
        assert!(cfg.validate().is_err());

        let cfg = config().with_params(VaultParams { min_output_percent: 101, ..VaultParams::default() });
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.deployed_at = u64::MAX;
        assert_eq!(cfg.validate(), Err(ReservoirError::Overflow));
    }
}

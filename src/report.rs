//! Read-only reporting

use serde::{Deserialize, Serialize};

use crate::contract::Reservoir;
use crate::error::Result;
use crate::reserve::ReserveAsset;
use crate::types::Amount;
use crate::venue::SwapVenue;
use reservoir_model::backing_ratio;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_supply: Amount,
    /// Reserve asset held by the contract
    pub reserve_balance: Amount,
    pub total_minted: Amount,
    /// `total_minted - total_supply`
    pub total_burned: Amount,
    /// Ledger tokens held by the contract itself
    pub contract_residue: Amount,
    /// Reserve asset per share, 1e18 scale; zero with no supply
    pub backing_ratio: Amount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceStatus {
    pub active: bool,
    pub ends_at: u64,
    pub remaining_secs: u64,
}

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    pub fn metrics(&self) -> Result<Metrics> {
        let contract = self.config.contract;
        let total_supply = self.ledger.total_supply();
        let reserve_balance = self.reserve.balance_of(&contract);

        Ok(Metrics {
            total_supply,
            reserve_balance,
            total_minted: self.ledger.total_minted(),
            total_burned: self.ledger.total_burned(),
            contract_residue: self.ledger.balance_of(&contract),
            backing_ratio: backing_ratio(reserve_balance, total_supply)?,
        })
    }

    pub fn issuance_status(&self, now: u64) -> Result<IssuanceStatus> {
        let ends_at = self.config.issuance_ends_at()?;
        Ok(IssuanceStatus {
            active: now <= ends_at,
            ends_at,
            remaining_secs: ends_at.saturating_sub(now),
        })
    }
}

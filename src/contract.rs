//! The contract instance: configuration, ledger, pair, reserve asset and venue
//!
//! Every state-changing entry point runs through [`Reservoir::execute`],
//! which holds the reentrancy guard and restores a checkpoint on failure,
//! so a failed call leaves no trace.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::VaultConfig;
use crate::error::{ReservoirError, Result};
use crate::events::Event;
use crate::exemption::ExemptionPolicy;
use crate::guard::ReentrancyGuard;
use crate::ledger::Ledger;
use crate::reserve::ReserveAsset;
use crate::types::{Address, Amount};
use crate::venue::SwapVenue;

/// Proof that the holder is the controller of one specific contract
#[derive(Debug, PartialEq, Eq)]
pub struct ControllerCap {
    contract: Address,
}

impl ControllerCap {
    pub fn contract(&self) -> Address {
        self.contract
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reservoir<R, V> {
    pub(crate) config: VaultConfig,
    pub(crate) ledger: Ledger,
    /// Zero means swaps are disabled
    pub(crate) pair: Address,
    pub(crate) reserve: R,
    pub(crate) venue: V,
    #[serde(default)]
    pub(crate) events: Vec<Event>,
    #[serde(skip)]
    pub(crate) guard: ReentrancyGuard,
}

/// Everything a failed call must hand back untouched
struct Checkpoint<R, V> {
    ledger: Ledger,
    pair: Address,
    reserve: R,
    venue: V,
    events_len: usize,
}

// ============================================================================
// Construction and accessors
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Deploy. `initial_supply` (may be zero) is minted to the controller.
    pub fn new(config: VaultConfig, reserve: R, venue: V, initial_supply: Amount) -> Result<Self> {
        config.validate()?;
        if reserve.id() != config.reserve_asset {
            return Err(ReservoirError::InvalidConfig(format!(
                "reserve asset {} does not match configured {}",
                reserve.id(),
                config.reserve_asset
            )));
        }
        if venue.address() != config.swap_venue {
            return Err(ReservoirError::InvalidConfig(format!(
                "swap venue {} does not match configured {}",
                venue.address(),
                config.swap_venue
            )));
        }

        let mut contract = Self {
            config,
            ledger: Ledger::new(),
            pair: Address::ZERO,
            reserve,
            venue,
            events: Vec::new(),
            guard: ReentrancyGuard::default(),
        };
        if initial_supply > 0 {
            let controller = contract.config.controller;
            contract.mint_tokens(&controller, initial_supply)?;
        }

        info!(
            "Deployed {} ({}) at {} with initial supply {}",
            contract.config.metadata.name,
            contract.config.metadata.symbol,
            contract.config.contract,
            initial_supply
        );
        Ok(contract)
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn name(&self) -> &str {
        &self.config.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.config.metadata.decimals
    }

    pub fn controller(&self) -> Address {
        self.config.controller
    }

    pub fn address(&self) -> Address {
        self.config.contract
    }

    pub fn pair(&self) -> Address {
        self.pair
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    pub fn reserve(&self) -> &R {
        &self.reserve
    }

    /// The reserve asset is an external token; holders act on it directly.
    pub fn reserve_mut(&mut self) -> &mut R {
        &mut self.reserve
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    pub fn venue_mut(&mut self) -> &mut V {
        &mut self.venue
    }

    pub fn exemption_policy(&self) -> ExemptionPolicy {
        ExemptionPolicy::from_config(&self.config)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }
}

// ============================================================================
// Atomic execution
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Run `op` under the guard; on error every component is rolled back.
    ///
    /// Emulates host transaction atomicity by cloning the ledger, reserve
    /// and venue up front, so every guarded call costs O(holders).
    pub(crate) fn execute<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.guard.enter()?;
        let checkpoint = self.checkpoint();

        let result = op(self);
        if let Err(ref e) = result {
            debug!("Call failed ({e}), restoring checkpoint");
            self.restore(checkpoint);
        }

        self.guard.exit();
        result
    }

    fn checkpoint(&self) -> Checkpoint<R, V> {
        Checkpoint {
            ledger: self.ledger.clone(),
            pair: self.pair,
            reserve: self.reserve.clone(),
            venue: self.venue.clone(),
            events_len: self.events.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint<R, V>) {
        self.ledger = checkpoint.ledger;
        self.pair = checkpoint.pair;
        self.reserve = checkpoint.reserve;
        self.venue = checkpoint.venue;
        self.events.truncate(checkpoint.events_len);
    }

    // Ledger legs that also log a Transfer event

    pub(crate) fn mint_tokens(&mut self, to: &Address, amount: Amount) -> Result<()> {
        self.ledger.mint(to, amount)?;
        self.events.push(Event::Transfer {
            from: Address::ZERO,
            to: *to,
            amount,
        });
        Ok(())
    }

    pub(crate) fn burn_tokens(&mut self, from: &Address, amount: Amount) -> Result<()> {
        self.ledger.burn(from, amount)?;
        self.events.push(Event::Transfer {
            from: *from,
            to: Address::ZERO,
            amount,
        });
        Ok(())
    }

    pub(crate) fn move_tokens(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.ledger.move_balance(from, to, amount)?;
        self.events.push(Event::Transfer {
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }
}

// ============================================================================
// Administration
// ============================================================================

impl<R, V> Reservoir<R, V>
where
    R: ReserveAsset + Clone,
    V: SwapVenue + Clone,
{
    /// Hand out the controller capability, only to the controller
    pub fn authorize_controller(&self, caller: &Address) -> Result<ControllerCap> {
        if *caller != self.config.controller {
            return Err(ReservoirError::Unauthorized);
        }
        Ok(ControllerCap {
            contract: self.config.contract,
        })
    }

    /// Point the swap leg at `pair`. Repeatable.
    pub fn set_pair_address(&mut self, cap: &ControllerCap, pair: Address) -> Result<()> {
        if cap.contract != self.config.contract {
            return Err(ReservoirError::Unauthorized);
        }
        if pair.is_zero() {
            return Err(ReservoirError::ZeroAddress);
        }

        self.execute(|c| {
            let previous = c.pair;
            c.pair = pair;
            c.events.push(Event::PairAddressSet { previous, pair });
            info!("Pair address set to {pair}");
            Ok(())
        })
    }
}

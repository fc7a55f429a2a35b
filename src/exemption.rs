//! Fee exemption predicate
//!
//! Transfers touching the controller or the contract's own account move
//! untaxed. The contract case is what lets the swap venue pull the swap
//! share out of the contract without re-entering the fee path.

use serde::{Deserialize, Serialize};

use crate::config::VaultConfig;
use crate::types::Address;

/// Why a transfer was exempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exemption {
    Controller,
    Contract,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExemptionPolicy {
    controller: Address,
    contract: Address,
}

impl ExemptionPolicy {
    pub fn new(controller: Address, contract: Address) -> Self {
        Self { controller, contract }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.controller, config.contract)
    }

    /// `None` means the transfer is taxed. The contract reason wins when both apply.
    pub fn check(&self, from: &Address, to: &Address) -> Option<Exemption> {
        if *from == self.contract || *to == self.contract {
            Some(Exemption::Contract)
        } else if *from == self.controller || *to == self.controller {
            Some(Exemption::Controller)
        } else {
            None
        }
    }

    pub fn is_exempt(&self, from: &Address, to: &Address) -> bool {
        self.check(from, to).is_some()
    }
}

//! Events emitted by the contract

use serde::{Deserialize, Serialize};

use crate::types::{Address, Amount};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Ledger movement; mints come from and burns go to the zero address
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    /// One per taxed transfer, after its `Transfer` legs
    TaxedTransfer {
        from: Address,
        to: Address,
        amount: Amount,
        net: Amount,
        burned: Amount,
        to_controller: Amount,
        swapped: Amount,
        reserve_received: Amount,
    },
    SwapExecuted {
        amount_in: Amount,
        min_amount_out: Amount,
        reserve_received: Amount,
    },
    SharesIssued {
        account: Address,
        deposit: Amount,
        shares: Amount,
        fee_to_contract: Amount,
        fee_to_controller: Amount,
    },
    SharesRedeemed {
        account: Address,
        shares: Amount,
        payout: Amount,
    },
    ResidueBurned {
        caller: Address,
        amount: Amount,
    },
    PairAddressSet {
        previous: Address,
        pair: Address,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Transfer { .. } => "Transfer",
            Event::Approval { .. } => "Approval",
            Event::TaxedTransfer { .. } => "TaxedTransfer",
            Event::SwapExecuted { .. } => "SwapExecuted",
            Event::SharesIssued { .. } => "SharesIssued",
            Event::SharesRedeemed { .. } => "SharesRedeemed",
            Event::ResidueBurned { .. } => "ResidueBurned",
            Event::PairAddressSet { .. } => "PairAddressSet",
        }
    }
}

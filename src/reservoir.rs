//! Reservoir: a taxed-transfer token backed by a reserve-asset vault
//!
//! ⚠️ EDUCATIONAL USE ONLY - NOT PRODUCTION READY ⚠️
//!
//! Every non-exempt transfer pays a 4.5% tax. A fifth of it is burned, a
//! twentieth goes to the controller and the rest is swapped into the reserve
//! asset through an external constant-product venue. During a fixed window
//! after deployment anyone may deposit reserve asset for newly minted shares;
//! at any time holders may burn shares for a pro-rata slice of the reserve.
//!
//! Guarantees:
//! 1. `sum(balances) == total_supply` after every call
//! 2. Fee shares sum exactly to the fee (the swap share is the remainder)
//! 3. Redemptions never pay out more than the reserve backing them
//! 4. A failed call leaves no partial state behind
//!
//! The pure arithmetic lives in `reservoir_model` and is shared with the
//! Kani harnesses.

#![forbid(unsafe_code)]

pub mod config;
pub mod contract;
pub mod error;
pub mod events;
pub mod exemption;
pub mod guard;
pub mod ledger;
pub mod report;
pub mod reserve;
mod swap;
pub mod transfer;
pub mod types;
pub mod vault;
pub mod venue;

pub use config::{
    TokenMetadata, VaultConfig, VaultParams, ISSUANCE_WINDOW_SECS, MIN_FEE, MIN_LIQUIDITY,
    MIN_TRANSFER, SWAP_DEADLINE_SECS,
};
pub use contract::{ControllerCap, Reservoir};
pub use error::{ReservoirError, Result};
pub use events::Event;
pub use exemption::{Exemption, ExemptionPolicy};
pub use guard::ReentrancyGuard;
pub use ledger::{Ledger, INFINITE_ALLOWANCE};
pub use report::{IssuanceStatus, Metrics};
pub use reserve::{safe_transfer, safe_transfer_from, MemoryReserve, ReserveAsset, ReserveError};
pub use transfer::{TransferKind, TransferReceipt};
pub use types::{Address, AddressParseError, Amount, Call};
pub use vault::Redemption;
pub use venue::{ConstantProductVenue, NoOpVenue, SwapContext, SwapVenue, VenueError};

pub use reservoir_model::{IssuanceQuote, TransferFee, FEE_BPS, MIN_OUTPUT_PERCENT, WAD};

/// Contract over the in-memory reserve token and the reference pool
pub type MemoryReservoir = Reservoir<MemoryReserve, ConstantProductVenue>;

//! Error types for the reservoir engine

use reservoir_model::ModelError;
use thiserror::Error;

use crate::venue::VenueError;

/// Every failure aborts the enclosing call with no partial state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservoirError {
    /// Zero, or below a floor that is not waived
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Insufficient allowance")]
    InsufficientAllowance,

    /// Zero address given where an account or pair is required
    #[error("Zero address")]
    ZeroAddress,

    #[error("Issuance period has ended")]
    IssuancePeriodEnded,

    /// Redemption would pay nothing, or there is nothing to burn
    #[error("Insufficient contract balance")]
    InsufficientContractBalance,

    #[error("Swap pair address not set")]
    PairNotSet,

    /// The venue call returned but delivered no reserve asset
    #[error("Swap failed: no reserve asset received")]
    SwapFailed,

    /// Caller does not hold the controller capability
    #[error("Unauthorized")]
    Unauthorized,

    /// A guarded operation was entered while another was in progress
    #[error("Reentrant call")]
    ReentrantCall,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Reserve asset transfer failed: {0}")]
    ReserveTransferFailed(String),

    #[error("Swap venue rejected the call: {0}")]
    Venue(#[from] VenueError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ModelError> for ReservoirError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidAmount => ReservoirError::InvalidAmount,
            ModelError::InsufficientLiquidity => ReservoirError::InsufficientContractBalance,
            ModelError::DivisionByZero | ModelError::Overflow => ReservoirError::Overflow,
        }
    }
}

pub type Result<T> = core::result::Result<T, ReservoirError>;

//! Swap venue interface
//!
//! The venue is an external constant-product exchange. It never holds a
//! reference to the contract; everything it does to the world goes through
//! the [`SwapContext`] it is handed for the duration of one swap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Address, Amount};
use reservoir_model::{get_amount_out, BPS_SCALE, VENUE_FEE_BPS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("deadline {deadline} passed at {now}")]
    Expired { deadline: u64, now: u64 },

    #[error("unsupported swap path")]
    InvalidPath,

    #[error("unknown pair")]
    UnknownPair,

    #[error("insufficient input amount")]
    InsufficientInputAmount,

    #[error("insufficient output amount: wanted at least {min}, got {out}")]
    InsufficientOutputAmount { min: Amount, out: Amount },

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("transfer rejected: {0}")]
    TransferRejected(String),
}

/// What a venue may observe and do while a swap is in flight
pub trait SwapContext {
    /// The account that called the venue
    fn caller(&self) -> Address;

    fn now(&self) -> u64;

    fn token_balance_of(&self, owner: &Address) -> Amount;

    /// Delegated pull of the ledger token, spending the venue's allowance over `from`.
    /// The contract only honours pulls into its pair, up to the swap amount.
    fn token_transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), VenueError>;

    fn reserve_balance_of(&self, owner: &Address) -> Amount;

    /// Pays reserve asset out of an account the venue controls (its pools)
    fn reserve_pay(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), VenueError>;
}

pub trait SwapVenue {
    /// Router address, the spender of the contract's allowance
    fn address(&self) -> Address;

    /// Live `(reserve_in, reserve_out)` for `pair`, or `None` if unknown or unseeded
    fn get_reserves(&self, pair: &Address, token_in: &Address, token_out: &Address)
        -> Option<(Amount, Amount)>;

    /// Swap exactly `amount_in` of `path[0]` for at least `amount_out_min`
    /// of `path[last]`, paid to `to`. Tolerates fee-on-transfer tokens.
    fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        ctx: &mut dyn SwapContext,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &[Address],
        to: &Address,
        deadline: u64,
    ) -> Result<(), VenueError>;
}

// ============================================================================
// No-op venue
// ============================================================================

/// Accepts every swap and does nothing (for testing)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoOpVenue {
    address: Address,
}

impl NoOpVenue {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl SwapVenue for NoOpVenue {
    fn address(&self) -> Address {
        self.address
    }

    fn get_reserves(&self, _pair: &Address, _token_in: &Address, _token_out: &Address)
        -> Option<(Amount, Amount)> {
        None
    }

    fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        _ctx: &mut dyn SwapContext,
        _amount_in: Amount,
        _amount_out_min: Amount,
        _path: &[Address],
        _to: &Address,
        _deadline: u64,
    ) -> Result<(), VenueError> {
        Ok(())
    }
}

// ============================================================================
// Constant product venue
// ============================================================================

/// Single x·y=k pool between `token_a` (the ledger token) and `token_b`
/// (the reserve asset). Pool balances live at `pair` on both tokens; the
/// cached reserves trail them until the next swap or `sync`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductVenue {
    router: Address,
    pair: Address,
    token_a: Address,
    token_b: Address,
    reserve_a: Amount,
    reserve_b: Amount,
    fee_bps: u128,
}

impl ConstantProductVenue {
    pub fn new(router: Address, pair: Address, token_a: Address, token_b: Address) -> Self {
        Self {
            router,
            pair,
            token_a,
            token_b,
            reserve_a: 0,
            reserve_b: 0,
            fee_bps: VENUE_FEE_BPS,
        }
    }

    pub fn with_fee_bps(mut self, fee_bps: u128) -> Self {
        self.fee_bps = fee_bps.min(BPS_SCALE - 1);
        self
    }

    pub fn pair(&self) -> Address {
        self.pair
    }

    pub fn fee_bps(&self) -> u128 {
        self.fee_bps
    }

    /// Cached `(reserve_a, reserve_b)`
    pub fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Adopt the pool's actual balances as its reserves
    pub fn sync(&mut self, balance_a: Amount, balance_b: Amount) {
        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
    }

    /// Output for `amount_in` of `token_a` at the cached reserves
    pub fn quote(&self, amount_in: Amount) -> Result<Amount, VenueError> {
        get_amount_out(amount_in, self.reserve_a, self.reserve_b, self.fee_bps)
            .map_err(|_| VenueError::InsufficientLiquidity)
    }
}

impl SwapVenue for ConstantProductVenue {
    fn address(&self) -> Address {
        self.router
    }

    fn get_reserves(&self, pair: &Address, token_in: &Address, token_out: &Address)
        -> Option<(Amount, Amount)> {
        if *pair != self.pair {
            return None;
        }
        if *token_in == self.token_a && *token_out == self.token_b {
            Some((self.reserve_a, self.reserve_b))
        } else if *token_in == self.token_b && *token_out == self.token_a {
            Some((self.reserve_b, self.reserve_a))
        } else {
            None
        }
    }

    fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        ctx: &mut dyn SwapContext,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &[Address],
        to: &Address,
        deadline: u64,
    ) -> Result<(), VenueError> {
        let now = ctx.now();
        if now > deadline {
            return Err(VenueError::Expired { deadline, now });
        }
        // Only the ledger-token -> reserve-asset direction is routed here
        if path != [self.token_a, self.token_b] {
            return Err(VenueError::InvalidPath);
        }
        if self.reserve_a == 0 || self.reserve_b == 0 {
            return Err(VenueError::InsufficientLiquidity);
        }

        let payer = ctx.caller();
        ctx.token_transfer_from(&payer, &self.pair, amount_in)?;

        // Whatever actually arrived, net of any transfer fee
        let received_in = ctx
            .token_balance_of(&self.pair)
            .checked_sub(self.reserve_a)
            .filter(|r| *r > 0)
            .ok_or(VenueError::InsufficientInputAmount)?;
        let amount_out = get_amount_out(received_in, self.reserve_a, self.reserve_b, self.fee_bps)
            .map_err(|_| VenueError::InsufficientLiquidity)?;

        let before = ctx.reserve_balance_of(to);
        if amount_out > 0 {
            ctx.reserve_pay(&self.pair, to, amount_out)?;
        }
        let out = ctx.reserve_balance_of(to).saturating_sub(before);
        if out < amount_out_min {
            return Err(VenueError::InsufficientOutputAmount {
                min: amount_out_min,
                out,
            });
        }

        self.reserve_a = ctx.token_balance_of(&self.pair);
        self.reserve_b = ctx.reserve_balance_of(&self.pair);
        Ok(())
    }
}

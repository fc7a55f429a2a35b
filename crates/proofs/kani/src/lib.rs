//! Kani harnesses for the reservoir model
//!
//! Run all: cargo kani -p proofs-kani
//! Run one: cargo kani -p proofs-kani --harness <name>

#[cfg(kani)]
mod fee_split;
#[cfg(kani)]
mod vault;
#[cfg(kani)]
mod swap_bound;

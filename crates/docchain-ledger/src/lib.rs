//! Balance accumulation over correction chains.
//!
//! This crate provides:
//! - Running balances over a linearized chain, in exact decimal arithmetic
//! - Signed amount formatting (`+ AED 1,234.50`), rounding only at display
//! - [`BalanceProjection`], the linear order plus balances plus aggregate
//!   summary that renderers consume

pub mod balance;
pub mod format;
pub mod projection;

pub use balance::{net_balance, running_balances};
pub use format::{format_amount, format_signed_amount, round_for_display};
pub use projection::BalanceProjection;

//! Unified error type for the engine.
//!
//! Every fallible operation across the crate returns [`EngineError`].  An
//! error always aborts the whole enclosing transaction: the engine discards
//! the draft state it was working on, so no partial effect of a failed call
//! is ever observable.  The [`Display`](core::fmt::Display) text is the
//! reason surfaced to the caller.

use thiserror::Error;

use crate::domain::Amount;

/// Errors produced by ledgers, pools, the router and the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The debited account holds less than the requested amount.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The spender's remaining allowance is below the requested amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// No seeded pool exists for the requested pair.
    #[error("pool not seeded")]
    PoolNotSeeded,

    /// The pair has already been seeded; pools are seeded exactly once.
    #[error("pool already seeded")]
    PoolAlreadySeeded,

    /// An amount that must be positive was zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// The realized output fell below the caller's minimum.
    #[error("slippage exceeded: minimum {min_out}, actual {actual}")]
    SlippageExceeded {
        /// Minimum acceptable output requested by the caller.
        min_out: Amount,
        /// Output the operation would actually have delivered.
        actual: Amount,
    },

    /// The course does not exist or has been deactivated.
    #[error("course not active")]
    CourseNotActive,

    /// The buyer already owns the course.
    #[error("course already purchased")]
    AlreadyPurchased,

    /// The caller may not perform this action.
    #[error("caller is not authorized")]
    Unauthorized,

    /// A collaborator (lending pool, external router) reverted or produced
    /// balance changes that do not match the request.
    #[error("external call failed: {0}")]
    ExternalCallFailed(&'static str),

    /// The pool cannot produce a non-zero output for the input.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// No course has been created under this identifier.
    #[error("course not found")]
    CourseNotFound,

    /// No ledger is registered for the token address.
    #[error("unknown token")]
    UnknownToken,

    /// A token argument is invalid for the operation.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A swap route is malformed.
    #[error("invalid route: {0}")]
    InvalidRoute(&'static str),

    /// A fee parameter is out of range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration blueprint failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T, E = EngineError> = core::result::Result<T, E>;

//! Domain value types shared by the ledgers, pools, router and marketplace.
//!
//! All types are newtypes or small records with validated constructors.
//! Amounts are raw integers; decimals are carried only as metadata.

mod address;
mod amount;
mod basis_points;
mod course;
mod decimals;
mod fee_tier;
mod pair_key;
mod pair_seed;
mod rounding;
mod route;
mod swap_outcome;
mod swap_request;
mod token;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use course::{Course, CourseId, CourseStatus};
pub use decimals::Decimals;
pub use fee_tier::FeeTier;
pub use pair_key::PairKey;
pub use pair_seed::PairSeed;
pub use rounding::Rounding;
pub use route::{Route, RouteStep};
pub use swap_outcome::SwapOutcome;
pub use swap_request::SwapRequest;
pub use token::Token;

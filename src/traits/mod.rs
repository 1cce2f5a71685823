//! Seams between the engine and its components.
//!
//! [`FromConfig`] builds components from blueprints. [`LendingPool`] and
//! [`ExternalRouter`] abstract the external protocols the router calls.

mod external_router;
mod from_config;
mod lending;

pub use external_router::ExternalRouter;
pub use from_config::FromConfig;
pub use lending::LendingPool;

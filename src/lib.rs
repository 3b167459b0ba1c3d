//! State container for a self-custodial wallet front-end
//!
//! Holds the imported accounts, the active account and display preferences,
//! and persists them through a [crate::core::Storage] backend.

pub mod core;

pub use crate::core::*;

//! ForestVote Environment Abstraction Layer
//!
//! This crate isolates every source of non-determinism the quiz touches so
//! that the same quiz logic runs against **Production** entropy (the OS
//! thread RNG) and **Simulation** entropy (a seeded stream, or a scripted
//! sequence in unit tests).
//!
//! # Core Concept: One Draw Primitive
//!
//! Every random decision is derived from a single primitive, a uniform unit
//! draw in `[0, 1)`. The helpers on [`EntropySource`] (`coin`, `uniform_int`,
//! `choice`, `bernoulli`) map that draw onto the decision, so a scripted
//! sequence of draws pins down a round exactly.
//!
//! # Example
//!
//! ```
//! use forestvote_env::{EntropySource, ScriptedEntropy};
//!
//! let mut entropy = ScriptedEntropy::new(vec![0.1, 0.9]);
//! assert!(entropy.coin());
//! assert!(!entropy.coin());
//! ```

mod context;
mod types;
mod error;
mod os_impl;
mod scripted;

pub use context::EntropySource;
pub use types::RoundId;
pub use error::EnvError;
pub use os_impl::OsEntropy;
pub use scripted::ScriptedEntropy;

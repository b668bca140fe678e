//! # prism-engine
//!
//! The public surface of Prism. [`EffectEngine`] wires a catalog, a vector
//! provider, a snapshot store, and a generative provider into one object
//! that answers "which effect does this request want?" either by pure
//! similarity or through the generative pipeline.

pub mod engine;
pub mod tracing_setup;

pub use engine::EffectEngine;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};

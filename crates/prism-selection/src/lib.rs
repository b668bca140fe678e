//! # prism-selection
//!
//! Generative side of effect selection.
//!
//! ```text
//! request ──▶ select ──▶ explain ──▶ evaluate ──▶ SelectionResult
//!               │           │            │
//!               └───── catalog context ──┘
//! ```
//!
//! Each stage is one [`IGenerativeProvider`](prism_core::traits::IGenerativeProvider)
//! call. Stages run strictly in order and any failure aborts the run.

pub mod explain;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod verdict;

pub use explain::explain_similarity;
pub use pipeline::SelectionPipeline;
pub use providers::{create_generator, create_storyteller, ApiChatProvider, Sampling};
pub use verdict::parse_verdict;

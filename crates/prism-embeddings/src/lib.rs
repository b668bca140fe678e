//! # prism-embeddings
//!
//! Everything on the vector side of effect selection.
//!
//! ## Architecture
//!
//! ```text
//! providers
//! ├── ApiVectorProvider   (OpenAI / Azure OpenAI /embeddings)
//! └── LocalVectorProvider (hashed bag-of-words, offline)
//! cache
//! ├── EmbeddingCache      (one vector per descriptor, fingerprint-keyed)
//! │   └── ISnapshotStore  (SQLite | JSON file | memory)
//! └── QueryMemo           (moka LRU, text → vector)
//! similarity              (cosine ranking, first maximum wins)
//! ```

pub mod cache;
pub mod providers;
pub mod similarity;

pub use cache::{
    create_store, EmbeddingCache, FileSnapshotStore, MemorySnapshotStore, QueryMemo,
    SqliteSnapshotStore,
};
pub use providers::{create_provider, ApiVectorProvider, LocalVectorProvider};
pub use similarity::{cosine_similarity, rank, rank_all};

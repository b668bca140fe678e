mod generative_provider;
mod snapshot_store;
mod vector_provider;

pub use generative_provider::IGenerativeProvider;
pub use snapshot_store::ISnapshotStore;
pub use vector_provider::IVectorProvider;

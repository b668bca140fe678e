// Single source of truth for all default values.

// --- Catalog ---
pub const DEFAULT_CATALOG_PATH: &str = "data/effects.json";

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "api";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";
pub const DEFAULT_PROVIDER_MAX_RETRIES: u32 = 2;
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

// --- Generation ---
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_GENERATION_MAX_TOKENS: u32 = 300;
pub const DEFAULT_STORY_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_STORY_MAX_TOKENS: u32 = 1000;

// --- Cache ---
pub const DEFAULT_SNAPSHOT_BACKEND: &str = "sqlite";
pub const DEFAULT_SNAPSHOT_PATH: &str = "prism-embeddings.db";
pub const DEFAULT_MEMO_CAPACITY: u64 = 1_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

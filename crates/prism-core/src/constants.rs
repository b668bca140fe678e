/// Prism system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Effect id returned when the generative selection names no catalog entry.
pub const NORMAL_EFFECT_ID: &str = "normal";

/// Leading token of an accepting verdict.
pub const VERDICT_ACCEPT_TOKEN: &str = "YES";

/// Leading token of a rejecting verdict.
pub const VERDICT_REJECT_TOKEN: &str = "NO";

/// Schema version written into persisted cache snapshots.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Upper bound accepted for `max_retries` in provider configuration.
pub const MAX_PROVIDER_RETRIES: u32 = 10;

/// Snapshot persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("I/O error on {path}: {reason}")]
    IoError { path: String, reason: String },

    #[error("snapshot corruption detected: {details}")]
    CorruptionDetected { details: String },
}

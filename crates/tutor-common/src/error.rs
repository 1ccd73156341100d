/// Error types shared across the tutor crates.
///
/// These errors represent failures in infrastructure (file I/O, JSON decoding)
/// that are not specific to one server. Application-specific errors should be
/// defined in each server crate and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

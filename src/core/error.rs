use thiserror::Error;

/// Contract violations and configuration failures.
///
/// Problems found in the document itself are never reported through this
/// type; they go to the [`Diagnostics`](super::Diagnostics) collector.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// The caller handed in a collector that already holds entries.
    #[error("diagnostics collector must be empty, found {0} entries")]
    DiagnosticsNotEmpty(usize),

    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// A source document could not be deserialized.
    #[error("document error: {0}")]
    Document(String),
}

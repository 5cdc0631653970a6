//! Errors produced when loading or validating corpus data.

use thiserror::Error;

/// Errors produced by the data loading module.
///
/// # Variants
///
/// - **Io**: Failed to read the file (e.g. file not found, permission denied, invalid UTF-8).
///   *When*: Reading the path in [`PathLoader`](super::PathLoader) or [`load_from_path`](super::load_from_path).
///
/// - **EmptyFile**: The source yields no documents (no lines, or only blank lines).
///   *Recovery*: Provide a corpus with at least one non-blank line.
///
/// - **EmptyDataItem**: A document was empty after trimming.
///   *When*: Building a [`DataItem`](super::DataItem) directly from a blank string.
#[derive(Debug, Error)]
pub enum DataError {
    /// I/O error while reading the input file.
    #[error("data io: {0}")]
    Io(#[from] std::io::Error),

    /// The input yields no non-empty documents.
    #[error("data: input is empty")]
    EmptyFile,

    /// A document was empty after trimming.
    #[error("data: empty document")]
    EmptyDataItem,
}

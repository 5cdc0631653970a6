//! Small corpus compiled into the binary, used when no corpus path is configured.

use super::super::{Data, DataError, DataLoader};

/// Documents used when no corpus file is configured.
pub const BUILTIN_CORPUS: &[&str] = &[
    "hello world",
    "this is sphere chat",
    "custom llm in rust",
    "sphere chat ai",
];

/// Loads [`BUILTIN_CORPUS`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinLoader;

impl DataLoader for BuiltinLoader {
    fn load(&self) -> Result<Data, DataError> {
        Data::from_lines(BUILTIN_CORPUS.iter().copied())
    }
}

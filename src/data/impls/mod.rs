//! Implementations of [`DataLoader`](super::DataLoader).

mod builtin;
mod path;

pub use builtin::{BuiltinLoader, BUILTIN_CORPUS};
pub use path::{load_from_path, PathLoader};

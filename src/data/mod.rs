//! Corpus loading: one document per line, from a file or the built-in corpus.
//!
//! [`DataLoader`] is the seam; [`PathLoader`] reads a file and [`BuiltinLoader`] serves
//! [`BUILTIN_CORPUS`]. Loaded documents are trimmed and blank lines are skipped.

mod error;
mod impls;
mod types;

use std::path::Path;

pub use error::DataError;
pub use impls::{load_from_path, BuiltinLoader, PathLoader, BUILTIN_CORPUS};
pub use types::{Data, DataItem};

/// Source of corpus documents.
pub trait DataLoader {
    fn load(&self) -> Result<Data, DataError>;
}

/// Loads the corpus at `path`, or the built-in corpus when no path is given.
pub fn load_corpus(path: Option<&Path>) -> Result<Data, DataError> {
    match path {
        Some(p) => load_from_path(p),
        None => BuiltinLoader.load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file(name: &str, lines: &[&str]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tinyformer_data_{name}_{}.txt", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        f.sync_all().unwrap();
        path
    }

    #[test]
    fn load_from_path_trims_and_skips_blank_lines() {
        let path = temp_file("lines", &["first line", "  second line  ", "", "   ", "third"]);
        let result = load_from_path(&path);
        let _ = std::fs::remove_file(&path);
        let data = result.unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.items()[1].as_str(), "second line");
        assert_eq!(data.lines(), ["first line", "second line", "third"]);
    }

    #[test]
    fn blank_file_is_empty() {
        let path = temp_file("blank", &["  ", ""]);
        let result = load_from_path(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(DataError::EmptyFile)));

        let path = temp_file("empty", &[]);
        let result = load_from_path(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(DataError::EmptyFile)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("tinyformer_data_does_not_exist.txt");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
        assert!(err.to_string().starts_with("data io:"));
    }

    #[test]
    fn data_item_rejects_blank() {
        assert!(matches!(DataItem::new("  \t"), Err(DataError::EmptyDataItem)));
        assert_eq!(DataItem::new(" ok ").unwrap().to_string(), "ok");
        assert!(matches!(Data::new(Vec::new()), Err(DataError::EmptyFile)));
    }

    #[test]
    fn builtin_corpus_is_used_without_path() {
        let data = load_corpus(None).unwrap();
        assert_eq!(data.lines(), BUILTIN_CORPUS);
    }

    #[test]
    fn load_corpus_prefers_path() {
        let path = temp_file("prefers", &["only line"]);
        let result = load_corpus(Some(path.as_path()));
        let _ = std::fs::remove_file(&path);
        assert_eq!(result.unwrap().lines(), ["only line"]);
    }
}

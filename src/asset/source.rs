//! Where an asset's raw content comes from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CompressorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Literal content.
    Inline(String),
    /// Path relative to the static root.
    File(PathBuf),
}

impl AssetSource {
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Read the raw content.
    pub fn load(&self, static_root: &Path) -> Result<String> {
        match self {
            Self::Inline(content) => Ok(content.clone()),
            Self::File(filename) => {
                let path = static_root.join(filename);
                fs::read_to_string(&path)
                    .map_err(|source| CompressorError::AssetSourceNotFound { path, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_inline() {
        let source = AssetSource::Inline("a{}".into());
        assert!(!source.is_file());
        assert_eq!(source.load(Path::new("unused")).unwrap(), "a{}");
    }

    #[test]
    fn test_load_nested_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/base.css"), "body{}").unwrap();

        let source = AssetSource::File("css/base.css".into());
        assert!(source.is_file());
        assert_eq!(source.load(dir.path()).unwrap(), "body{}");
    }

    #[test]
    fn test_load_directory_fails() {
        let dir = TempDir::new().unwrap();
        let source = AssetSource::File(".".into());
        assert!(matches!(
            source.load(dir.path()),
            Err(CompressorError::AssetSourceNotFound { .. })
        ));
    }
}

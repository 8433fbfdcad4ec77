//! Implements DeckStore on the local filesystem.
//!
//! One file per export under the output directory, written atomically.

use crate::domain::DomainError;
use crate::ports::DeckStore;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

const FALLBACK_STEM: &str = "lesson";

/// File-system deck storage.
pub struct FsDeckStore {
    base_dir: PathBuf,
    extension: &'static str,
}

impl FsDeckStore {
    pub fn new(base_dir: impl AsRef<Path>, extension: &'static str) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            extension,
        }
    }

    /// Reduce a generated name to a bare file name inside `base_dir`, with our extension.
    fn target_name(&self, file_name: &str) -> String {
        let last = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        let name = if last.is_empty() || last.chars().all(|c| c == '.') {
            FALLBACK_STEM
        } else {
            last
        };
        let suffix = format!(".{}", self.extension);
        if name.to_ascii_lowercase().ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{}{}", name, suffix)
        }
    }

    /// Write-replace: temp file, sync_all, then rename over the target.
    async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let result: Result<(), DomainError> = async {
            let mut f = fs::File::create(&temp_path)
                .await
                .map_err(|e| DomainError::Export(format!("create temp file: {}", e)))?;
            f.write_all(bytes)
                .await
                .map_err(|e| DomainError::Export(format!("write temp file: {}", e)))?;
            f.sync_all()
                .await
                .map_err(|e| DomainError::Export(format!("sync temp file: {}", e)))?;
            drop(f);
            fs::rename(&temp_path, path)
                .await
                .map_err(|e| DomainError::Export(format!("atomic rename failed: {}", e)))
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

#[async_trait::async_trait]
impl DeckStore for FsDeckStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Export(format!("create output dir: {}", e)))?;

        let path = self.base_dir.join(self.target_name(file_name));
        Self::write_atomic(&path, bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "deck written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_name() {
        let store = FsDeckStore::new(".", "pptx");
        assert_eq!(
            store.target_name("English_6_Unit1_GettingStarted_GlobalSuccess.pptx"),
            "English_6_Unit1_GettingStarted_GlobalSuccess.pptx"
        );
        assert_eq!(store.target_name("../../etc/deck.PPTX"), "deck.PPTX");
        assert_eq!(store.target_name("C:\\tmp\\deck"), "deck.pptx");
        assert_eq!(store.target_name(""), "lesson.pptx");
        assert_eq!(store.target_name("dir/"), "lesson.pptx");
        assert_eq!(store.target_name(".."), "lesson.pptx");
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDeckStore::new(dir.path().join("out"), "pptx");

        let path = store.save("English_7_Unit2.pptx", b"PK\x03\x04").await.unwrap();

        assert_eq!(path, dir.path().join("out").join("English_7_Unit2.pptx"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04");
        assert!(!dir.path().join("out").join("English_7_Unit2.pptx.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDeckStore::new(dir.path(), "pptx");
        store.save("a.pptx", b"one").await.unwrap();
        let path = store.save("a.pptx", b"two").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // base_dir is a regular file, so create_dir_all fails
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let store = FsDeckStore::new(&blocker, "pptx");

        let err = store.save("a.pptx", b"data").await.unwrap_err();
        assert!(matches!(err, DomainError::Export(_)));
        assert!(!blocker.join("a.pptx").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // a directory at the target path makes the final rename fail
        std::fs::create_dir(dir.path().join("a.pptx")).unwrap();
        let store = FsDeckStore::new(dir.path(), "pptx");

        let err = store.save("a.pptx", b"data").await.unwrap_err();
        assert!(matches!(err, DomainError::Export(_)));
        assert!(!dir.path().join("a.pptx.tmp").exists());
        assert!(dir.path().join("a.pptx").is_dir());
    }
}
